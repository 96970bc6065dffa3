//! Font attribute types: weight, underline and scale.

use std::fmt;

/// A font weight on the 1-1000 scale, 400 being normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(u16);

const WEIGHT_NICKS: &[(&str, u16)] = &[
    ("thin", 100),
    ("ultralight", 200),
    ("light", 300),
    ("semilight", 350),
    ("book", 380),
    ("normal", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
    ("ultrabold", 800),
    ("heavy", 900),
    ("ultraheavy", 1000),
];

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const ULTRALIGHT: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const SEMILIGHT: Self = Self(350);
    pub const BOOK: Self = Self(380);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const ULTRABOLD: Self = Self(800);
    pub const HEAVY: Self = Self(900);
    pub const ULTRAHEAVY: Self = Self(1000);

    /// Create a weight from a numeric value, rejecting anything outside 1-1000.
    pub fn new(value: u16) -> Option<Self> {
        (1..=1000).contains(&value).then_some(Self(value))
    }

    /// The numeric weight.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Look a weight up by its nickname (`"bold"`, `"semilight"`, ...).
    pub fn from_nick(nick: &str) -> Option<Self> {
        WEIGHT_NICKS
            .iter()
            .find(|(name, _)| *name == nick)
            .map(|(_, value)| Self(*value))
    }

    /// The nickname for this weight, if it is one of the named buckets.
    pub fn nick(self) -> Option<&'static str> {
        WEIGHT_NICKS
            .iter()
            .find(|(_, value)| *value == self.0)
            .map(|(name, _)| *name)
    }

    /// Parse a nickname or a bare integer.
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_nick(value).or_else(|| value.trim().parse().ok().and_then(Self::new))
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nick() {
            Some(nick) => f.write_str(nick),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Underline decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    Low,
    Error,
    SingleLine,
    DoubleLine,
    ErrorLine,
}

impl Underline {
    const ALL: [Underline; 8] = [
        Underline::None,
        Underline::Single,
        Underline::Double,
        Underline::Low,
        Underline::Error,
        Underline::SingleLine,
        Underline::DoubleLine,
        Underline::ErrorLine,
    ];

    /// The attribute spelling of this variant.
    pub fn nick(self) -> &'static str {
        match self {
            Underline::None => "none",
            Underline::Single => "single",
            Underline::Double => "double",
            Underline::Low => "low",
            Underline::Error => "error",
            Underline::SingleLine => "single-line",
            Underline::DoubleLine => "double-line",
            Underline::ErrorLine => "error-line",
        }
    }

    /// Look a variant up by its nickname.
    pub fn from_nick(nick: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.nick() == nick)
    }

    /// Parse a nickname, or a boolean as a `single`/`none` shortcut.
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_nick(value).or_else(|| {
            super::parse_boolean(value).map(|on| if on { Underline::Single } else { Underline::None })
        })
    }
}

impl fmt::Display for Underline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nick())
    }
}

/// Named text scale factors.
pub mod scale {
    pub const XX_SMALL: f64 = 0.578_703_703_703_7;
    pub const X_SMALL: f64 = 0.694_444_444_444_4;
    pub const SMALL: f64 = 0.833_333_333_333_3;
    pub const MEDIUM: f64 = 1.0;
    pub const LARGE: f64 = 1.2;
    pub const X_LARGE: f64 = 1.44;
    pub const XX_LARGE: f64 = 1.728;

    const NAMED: &[(&str, f64)] = &[
        ("xx-small", XX_SMALL),
        ("x-small", X_SMALL),
        ("small", SMALL),
        ("medium", MEDIUM),
        ("large", LARGE),
        ("x-large", X_LARGE),
        ("xx-large", XX_LARGE),
    ];

    /// Parse a named bucket or a decimal number.
    ///
    /// Only finite, positive factors are accepted.
    pub fn parse(value: &str) -> Option<f64> {
        let factor = match NAMED.iter().find(|(name, _)| *name == value) {
            Some((_, factor)) => *factor,
            None => value.trim().parse::<f64>().ok()?,
        };
        (factor.is_finite() && factor > 0.0).then_some(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_parse() {
        assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
        assert_eq!(FontWeight::parse("semilight"), Some(FontWeight::SEMILIGHT));
        assert_eq!(FontWeight::parse("450"), FontWeight::new(450));
        assert_eq!(FontWeight::parse("0"), None);
        assert_eq!(FontWeight::parse("1001"), None);
        assert_eq!(FontWeight::parse("Bold"), None);
        assert_eq!(FontWeight::parse("chunky"), None);
    }

    #[test]
    fn test_weight_display() {
        assert_eq!(FontWeight::BOOK.to_string(), "book");
        assert_eq!(FontWeight::new(450).unwrap().to_string(), "450");
        assert_eq!(FontWeight::default(), FontWeight::NORMAL);
    }

    #[test]
    fn test_underline_parse() {
        assert_eq!(Underline::parse("error-line"), Some(Underline::ErrorLine));
        assert_eq!(Underline::parse("double"), Some(Underline::Double));
        assert_eq!(Underline::parse("true"), Some(Underline::Single));
        assert_eq!(Underline::parse("False"), Some(Underline::None));
        assert_eq!(Underline::parse("wavy"), None);
    }

    #[test]
    fn test_scale_parse() {
        assert_eq!(scale::parse("x-large"), Some(scale::X_LARGE));
        assert_eq!(scale::parse("medium"), Some(1.0));
        assert_eq!(scale::parse("1.25"), Some(1.25));
        assert_eq!(scale::parse("0"), None);
        assert_eq!(scale::parse("-2"), None);
        assert_eq!(scale::parse("inf"), None);
        assert_eq!(scale::parse("NaN"), None);
        assert_eq!(scale::parse("huge"), None);
    }
}
