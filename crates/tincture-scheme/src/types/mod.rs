//! Value types shared by styles and the parser.

mod font;
mod rgba;
mod value;

pub use font::{scale, FontWeight, Underline};
pub use rgba::Rgba;
pub use value::StyleValue;

/// Parse a scheme-file boolean from its first character.
///
/// `y`, `t` and `1` mean true; `n`, `f` and `0` mean false (case-insensitive).
///
/// ```
/// use tincture_scheme::types::parse_boolean;
///
/// assert_eq!(parse_boolean("yes"), Some(true));
/// assert_eq!(parse_boolean("FALSE"), Some(false));
/// assert_eq!(parse_boolean("maybe"), None);
/// ```
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.chars().next()? {
        'y' | 'Y' | 't' | 'T' | '1' => Some(true),
        'n' | 'N' | 'f' | 'F' | '0' => Some(false),
        _ => None,
    }
}
