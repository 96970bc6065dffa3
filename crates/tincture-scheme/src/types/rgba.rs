//! RGBA color values.

use std::fmt;

/// A non-premultiplied RGBA color with components in `0.0..=1.0`.
///
/// Components are normalized on construction: clamped into range (NaN becomes
/// `0.0`) and snapped to the nearest 1/255 step. Two colors that render the
/// same hex string therefore compare equal, and writing a color out as hex and
/// reading it back yields the identical value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

/// Fixed table of named colors understood by [`Rgba::parse`].
const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("aqua", [0, 255, 255, 255]),
    ("black", [0, 0, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("gray", [128, 128, 128, 255]),
    ("green", [0, 128, 0, 255]),
    ("grey", [128, 128, 128, 255]),
    ("lime", [0, 255, 0, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("olive", [128, 128, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("red", [255, 0, 0, 255]),
    ("silver", [192, 192, 192, 255]),
    ("teal", [0, 128, 128, 255]),
    ("transparent", [0, 0, 0, 0]),
    ("white", [255, 255, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
];

#[inline]
fn normalize(v: f32) -> f32 {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    (v * 255.0).round() / 255.0
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round() as u8
}

impl Rgba {
    /// Fully transparent black, the default for unset color attributes.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a color from RGBA components (0.0-1.0 range).
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: normalize(r),
            g: normalize(g),
            b: normalize(b),
            a: normalize(a),
        }
    }

    /// Create an opaque color from RGB components.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit RGBA components.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit RGB components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Red component.
    #[inline]
    pub fn r(&self) -> f32 {
        self.r
    }

    /// Green component.
    #[inline]
    pub fn g(&self) -> f32 {
        self.g
    }

    /// Blue component.
    #[inline]
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Alpha component.
    #[inline]
    pub fn a(&self) -> f32 {
        self.a
    }

    /// Whether the color has full alpha.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Components as 8-bit values `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }

    /// Parse a hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        let [r, g, b, a] = match hex.len() {
            3 => [short(0)?, short(1)?, short(2)?, 255],
            4 => [short(0)?, short(1)?, short(2)?, short(3)?],
            6 => [long(0)?, long(2)?, long(4)?, 255],
            8 => [long(0)?, long(2)?, long(4)?, long(6)?],
            _ => return None,
        };
        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Parse any color syntax found in scheme files.
    ///
    /// Accepts hex forms, `rgb(r, g, b)` and `rgba(r, g, b, a)` (channels as
    /// `0-255` numbers or percentages, alpha as `0-1`), and a small table of
    /// CSS color names. A legacy `#rgb(` / `#rgba(` spelling is accepted by
    /// dropping the `#`. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = match value.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("#rgb") => &value[1..],
            _ => value,
        };

        if value.starts_with('#') {
            return Self::from_hex(value);
        }

        let lower = value.to_ascii_lowercase();
        if let Some(args) = lower.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            return parse_functional(args, true);
        }
        if let Some(args) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            return parse_functional(args, false);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, [r, g, b, a])| Self::from_rgba8(*r, *g, *b, *a))
    }

    /// Canonical CSS string, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
    ///
    /// Equal colors always produce equal strings, which makes this suitable
    /// as a lookup key.
    pub fn to_css_string(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        if self.is_opaque() {
            format!("rgb({r},{g},{b})")
        } else {
            format!("rgba({r},{g},{b},{})", self.a)
        }
    }

    /// Uppercase hex string: `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if self.is_opaque() {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = if with_alpha {
        let a: f32 = parts[3].parse().ok()?;
        if !a.is_finite() {
            return None;
        }
        a
    } else {
        1.0
    };
    Some(Rgba::new(r, g, b, a))
}

fn parse_channel(part: &str) -> Option<f32> {
    let value = match part.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
        None => part.parse::<f32>().ok()? / 255.0,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Rgba::from_hex("#ffffff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("#000"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_hex("#f00"), Some(Rgba::from_rgb8(255, 0, 0)));
        assert_eq!(
            Rgba::from_hex("#11223380"),
            Some(Rgba::from_rgba8(0x11, 0x22, 0x33, 0x80))
        );
        assert_eq!(Rgba::from_hex("#fff8"), Some(Rgba::from_rgba8(255, 255, 255, 0x88)));
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#gggggg"), None);
        assert_eq!(Rgba::from_hex("#ééé"), None);
    }

    #[test]
    fn test_parse_functional_and_named() {
        assert_eq!(Rgba::parse("rgb(255, 0, 0)"), Some(Rgba::from_rgb8(255, 0, 0)));
        assert_eq!(Rgba::parse("RGB(100%,0%,0%)"), Some(Rgba::from_rgb8(255, 0, 0)));
        assert_eq!(
            Rgba::parse("rgba(0,0,0,0.5)"),
            Some(Rgba::from_rgba8(0, 0, 0, 128))
        );
        assert_eq!(Rgba::parse("#rgba(0,0,0,0.5)"), Rgba::parse("rgba(0,0,0,0.5)"));
        assert_eq!(Rgba::parse("#rgb(1,2,3)"), Some(Rgba::from_rgb8(1, 2, 3)));
        assert_eq!(Rgba::parse("White"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
        assert_eq!(Rgba::parse("rgb(1,2)"), None);
        assert_eq!(Rgba::parse("not-a-color"), None);
    }

    #[test]
    fn test_normalization_makes_hex_lossless() {
        let color = Rgba::new(0.3, 0.6, 0.9, 0.42);
        let reparsed = Rgba::from_hex(&color.to_hex()).unwrap();
        assert_eq!(color, reparsed);

        let clamped = Rgba::new(2.0, -1.0, f32::NAN, 1.0);
        assert_eq!(clamped, Rgba::from_rgb8(255, 0, 0));
    }

    #[test]
    fn test_string_forms() {
        let color = Rgba::from_rgb8(0x1e, 0x1e, 0x2e);
        assert_eq!(color.to_hex(), "#1E1E2E");
        assert_eq!(color.to_css_string(), "rgb(30,30,46)");

        let translucent = Rgba::from_rgba8(255, 0, 0, 0);
        assert_eq!(translucent.to_hex(), "#FF000000");
        assert_eq!(translucent.to_css_string(), "rgba(255,0,0,0)");
        assert_eq!(translucent.to_string(), "#FF000000");
    }
}
