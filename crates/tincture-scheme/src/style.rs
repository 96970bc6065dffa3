//! Highlight styles and their tri-state attributes.
//!
//! A [`Style`] is keyed by a name such as `"c:function"`. The text before the
//! first `:` is the style's language tag, used to group styles when a scheme
//! is written out. Each of the eleven attributes is a [`StyleValue`]: unset,
//! cleared back to its default, or set to an explicit value. A style with no
//! set attribute is *empty* and is never serialized.

use std::fmt;

use tincture_core::Signal;

use crate::error::{Error, Result};
use crate::types::{FontWeight, Rgba, StyleValue, Underline};
use crate::writer::{ColorNames, XmlOut};

/// The attributes a style can carry, in canonical serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleAttribute {
    Background,
    Foreground,
    LineBackground,
    Bold,
    Weight,
    Italic,
    Underline,
    UnderlineColor,
    Scale,
    Strikethrough,
    UseStyle,
}

impl StyleAttribute {
    /// Every attribute, in the order they are written.
    pub const ALL: [StyleAttribute; 11] = [
        StyleAttribute::Background,
        StyleAttribute::Foreground,
        StyleAttribute::LineBackground,
        StyleAttribute::Bold,
        StyleAttribute::Weight,
        StyleAttribute::Italic,
        StyleAttribute::Underline,
        StyleAttribute::UnderlineColor,
        StyleAttribute::Scale,
        StyleAttribute::Strikethrough,
        StyleAttribute::UseStyle,
    ];

    /// The four color-typed attributes.
    pub const COLORS: [StyleAttribute; 4] = [
        StyleAttribute::Background,
        StyleAttribute::Foreground,
        StyleAttribute::LineBackground,
        StyleAttribute::UnderlineColor,
    ];

    /// The markup attribute name.
    pub fn name(self) -> &'static str {
        match self {
            StyleAttribute::Background => "background",
            StyleAttribute::Foreground => "foreground",
            StyleAttribute::LineBackground => "line-background",
            StyleAttribute::Bold => "bold",
            StyleAttribute::Weight => "weight",
            StyleAttribute::Italic => "italic",
            StyleAttribute::Underline => "underline",
            StyleAttribute::UnderlineColor => "underline-color",
            StyleAttribute::Scale => "scale",
            StyleAttribute::Strikethrough => "strikethrough",
            StyleAttribute::UseStyle => "use-style",
        }
    }

    /// Look an attribute up by its markup name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub fn is_color(self) -> bool {
        Self::COLORS.contains(&self)
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed attribute value, used by [`Style::get`] and [`Style::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Color(Rgba),
    Flag(bool),
    Weight(FontWeight),
    Underline(Underline),
    Scale(f64),
    UseStyle(String),
}

/// A named bundle of optional highlight attributes.
#[derive(Debug)]
pub struct Style {
    name: String,
    language: Option<String>,
    background: StyleValue<Rgba>,
    foreground: StyleValue<Rgba>,
    line_background: StyleValue<Rgba>,
    underline_color: StyleValue<Rgba>,
    bold: StyleValue<bool>,
    italic: StyleValue<bool>,
    strikethrough: StyleValue<bool>,
    weight: StyleValue<FontWeight>,
    underline: StyleValue<Underline>,
    scale: StyleValue<f64>,
    use_style: StyleValue<String>,
    changed: Signal<StyleAttribute>,
}

fn assign<T: PartialEq>(slot: &mut StyleValue<T>, value: T) -> bool {
    if slot.as_set() == Some(&value) {
        return false;
    }
    *slot = StyleValue::Set(value);
    true
}

fn revert<T>(slot: &mut StyleValue<T>) -> bool {
    if !slot.is_set() {
        return false;
    }
    *slot = StyleValue::Cleared;
    true
}

impl Style {
    /// Create an empty style.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let language = name
            .split_once(':')
            .map(|(lang, _)| lang)
            .filter(|lang| !lang.is_empty())
            .map(str::to_owned);

        Self {
            name,
            language,
            background: StyleValue::Unset,
            foreground: StyleValue::Unset,
            line_background: StyleValue::Unset,
            underline_color: StyleValue::Unset,
            bold: StyleValue::Unset,
            italic: StyleValue::Unset,
            strikethrough: StyleValue::Unset,
            weight: StyleValue::Unset,
            underline: StyleValue::Unset,
            scale: StyleValue::Unset,
            use_style: StyleValue::Unset,
            changed: Signal::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The language tag: the part of the name before the first `:`.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Emitted with the attribute that changed, after every change.
    pub fn changed(&self) -> &Signal<StyleAttribute> {
        &self.changed
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        StyleAttribute::ALL.iter().all(|attr| !self.is_set(*attr))
    }

    pub fn is_set(&self, attr: StyleAttribute) -> bool {
        match attr {
            StyleAttribute::Background => self.background.is_set(),
            StyleAttribute::Foreground => self.foreground.is_set(),
            StyleAttribute::LineBackground => self.line_background.is_set(),
            StyleAttribute::UnderlineColor => self.underline_color.is_set(),
            StyleAttribute::Bold => self.bold.is_set(),
            StyleAttribute::Italic => self.italic.is_set(),
            StyleAttribute::Strikethrough => self.strikethrough.is_set(),
            StyleAttribute::Weight => self.weight.is_set(),
            StyleAttribute::Underline => self.underline.is_set(),
            StyleAttribute::Scale => self.scale.is_set(),
            StyleAttribute::UseStyle => self.use_style.is_set(),
        }
    }

    /// The tri-state value of any attribute.
    pub fn get(&self, attr: StyleAttribute) -> StyleValue<AttributeValue> {
        match attr {
            StyleAttribute::Background => self.background.map(AttributeValue::Color),
            StyleAttribute::Foreground => self.foreground.map(AttributeValue::Color),
            StyleAttribute::LineBackground => self.line_background.map(AttributeValue::Color),
            StyleAttribute::UnderlineColor => self.underline_color.map(AttributeValue::Color),
            StyleAttribute::Bold => self.bold.map(AttributeValue::Flag),
            StyleAttribute::Italic => self.italic.map(AttributeValue::Flag),
            StyleAttribute::Strikethrough => self.strikethrough.map(AttributeValue::Flag),
            StyleAttribute::Weight => self.weight.map(AttributeValue::Weight),
            StyleAttribute::Underline => self.underline.map(AttributeValue::Underline),
            StyleAttribute::Scale => self.scale.map(AttributeValue::Scale),
            StyleAttribute::UseStyle => self.use_style.clone().map(AttributeValue::UseStyle),
        }
    }

    /// The value in effect: the explicit value, or the attribute's default.
    pub fn effective(&self, attr: StyleAttribute) -> AttributeValue {
        match self.get(attr) {
            StyleValue::Set(value) => value,
            StyleValue::Cleared | StyleValue::Unset => Self::default_value(attr),
        }
    }

    /// The value an attribute takes when it is not set.
    pub fn default_value(attr: StyleAttribute) -> AttributeValue {
        match attr {
            StyleAttribute::Background
            | StyleAttribute::Foreground
            | StyleAttribute::LineBackground
            | StyleAttribute::UnderlineColor => AttributeValue::Color(Rgba::TRANSPARENT),
            StyleAttribute::Bold | StyleAttribute::Italic | StyleAttribute::Strikethrough => {
                AttributeValue::Flag(false)
            }
            StyleAttribute::Weight => AttributeValue::Weight(FontWeight::NORMAL),
            StyleAttribute::Underline => AttributeValue::Underline(Underline::None),
            StyleAttribute::Scale => AttributeValue::Scale(1.0),
            StyleAttribute::UseStyle => AttributeValue::UseStyle(String::new()),
        }
    }

    /// Set any attribute from a dynamically typed value.
    ///
    /// Returns whether the stored value changed; fails if the value type does
    /// not fit the attribute.
    pub fn set(&mut self, attr: StyleAttribute, value: AttributeValue) -> Result<bool> {
        let changed = match (attr, value) {
            (StyleAttribute::Background, AttributeValue::Color(c)) => self.set_background(c),
            (StyleAttribute::Foreground, AttributeValue::Color(c)) => self.set_foreground(c),
            (StyleAttribute::LineBackground, AttributeValue::Color(c)) => {
                self.set_line_background(c)
            }
            (StyleAttribute::UnderlineColor, AttributeValue::Color(c)) => {
                self.set_underline_color(c)
            }
            (StyleAttribute::Bold, AttributeValue::Flag(b)) => self.set_bold(b),
            (StyleAttribute::Italic, AttributeValue::Flag(b)) => self.set_italic(b),
            (StyleAttribute::Strikethrough, AttributeValue::Flag(b)) => self.set_strikethrough(b),
            (StyleAttribute::Weight, AttributeValue::Weight(w)) => self.set_weight(w),
            (StyleAttribute::Underline, AttributeValue::Underline(u)) => self.set_underline(u),
            (StyleAttribute::Scale, AttributeValue::Scale(s)) => self.set_scale(s)?,
            (StyleAttribute::UseStyle, AttributeValue::UseStyle(s)) => self.set_use_style(s),
            (attr, value) => {
                return Err(Error::invalid_value(
                    attr.name(),
                    format!("{value:?} does not fit this attribute"),
                ));
            }
        };
        Ok(changed)
    }

    /// Revert an attribute to its default.
    ///
    /// Clearing an attribute that is not set does nothing and returns `false`.
    pub fn clear(&mut self, attr: StyleAttribute) -> bool {
        let changed = match attr {
            StyleAttribute::Background => revert(&mut self.background),
            StyleAttribute::Foreground => revert(&mut self.foreground),
            StyleAttribute::LineBackground => revert(&mut self.line_background),
            StyleAttribute::UnderlineColor => revert(&mut self.underline_color),
            StyleAttribute::Bold => revert(&mut self.bold),
            StyleAttribute::Italic => revert(&mut self.italic),
            StyleAttribute::Strikethrough => revert(&mut self.strikethrough),
            StyleAttribute::Weight => revert(&mut self.weight),
            StyleAttribute::Underline => revert(&mut self.underline),
            StyleAttribute::Scale => revert(&mut self.scale),
            StyleAttribute::UseStyle => revert(&mut self.use_style),
        };
        self.notify(attr, changed)
    }

    fn notify(&self, attr: StyleAttribute, changed: bool) -> bool {
        if changed {
            self.changed.emit(attr);
        }
        changed
    }

    pub fn background(&self) -> StyleValue<Rgba> {
        self.background
    }

    pub fn foreground(&self) -> StyleValue<Rgba> {
        self.foreground
    }

    pub fn line_background(&self) -> StyleValue<Rgba> {
        self.line_background
    }

    pub fn underline_color(&self) -> StyleValue<Rgba> {
        self.underline_color
    }

    pub fn bold(&self) -> StyleValue<bool> {
        self.bold
    }

    pub fn italic(&self) -> StyleValue<bool> {
        self.italic
    }

    pub fn strikethrough(&self) -> StyleValue<bool> {
        self.strikethrough
    }

    pub fn weight(&self) -> StyleValue<FontWeight> {
        self.weight
    }

    pub fn underline(&self) -> StyleValue<Underline> {
        self.underline
    }

    pub fn scale(&self) -> StyleValue<f64> {
        self.scale
    }

    pub fn use_style(&self) -> &StyleValue<String> {
        &self.use_style
    }

    /// The name of the style this one aliases, when `use-style` is set.
    pub fn use_style_alias(&self) -> Option<&str> {
        self.use_style.as_set().map(String::as_str)
    }

    pub fn set_background(&mut self, value: Rgba) -> bool {
        let changed = assign(&mut self.background, value);
        self.notify(StyleAttribute::Background, changed)
    }

    pub fn set_foreground(&mut self, value: Rgba) -> bool {
        let changed = assign(&mut self.foreground, value);
        self.notify(StyleAttribute::Foreground, changed)
    }

    pub fn set_line_background(&mut self, value: Rgba) -> bool {
        let changed = assign(&mut self.line_background, value);
        self.notify(StyleAttribute::LineBackground, changed)
    }

    pub fn set_underline_color(&mut self, value: Rgba) -> bool {
        let changed = assign(&mut self.underline_color, value);
        self.notify(StyleAttribute::UnderlineColor, changed)
    }

    pub fn set_bold(&mut self, value: bool) -> bool {
        let changed = assign(&mut self.bold, value);
        self.notify(StyleAttribute::Bold, changed)
    }

    pub fn set_italic(&mut self, value: bool) -> bool {
        let changed = assign(&mut self.italic, value);
        self.notify(StyleAttribute::Italic, changed)
    }

    pub fn set_strikethrough(&mut self, value: bool) -> bool {
        let changed = assign(&mut self.strikethrough, value);
        self.notify(StyleAttribute::Strikethrough, changed)
    }

    /// Set the weight. `normal` counts as an explicit value like any other.
    pub fn set_weight(&mut self, value: FontWeight) -> bool {
        let changed = assign(&mut self.weight, value);
        self.notify(StyleAttribute::Weight, changed)
    }

    pub fn set_underline(&mut self, value: Underline) -> bool {
        let changed = assign(&mut self.underline, value);
        self.notify(StyleAttribute::Underline, changed)
    }

    /// Set the scale factor, which must be finite and positive.
    pub fn set_scale(&mut self, value: f64) -> Result<bool> {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::invalid_value(
                StyleAttribute::Scale.name(),
                format!("{value} is not a positive finite factor"),
            ));
        }
        let changed = assign(&mut self.scale, value);
        Ok(self.notify(StyleAttribute::Scale, changed))
    }

    pub fn set_use_style(&mut self, value: impl Into<String>) -> bool {
        let changed = assign(&mut self.use_style, value.into());
        self.notify(StyleAttribute::UseStyle, changed)
    }

    /// Swap every set color attribute equal to `previous` for `current`.
    ///
    /// Comparison is by value, so any attribute holding the same literal color
    /// follows along. Returns the number of attributes updated.
    pub fn on_color_value_replaced(&mut self, previous: Rgba, current: Rgba) -> usize {
        let mut updated = 0;
        for attr in StyleAttribute::COLORS {
            let slot = match attr {
                StyleAttribute::Background => &mut self.background,
                StyleAttribute::Foreground => &mut self.foreground,
                StyleAttribute::LineBackground => &mut self.line_background,
                _ => &mut self.underline_color,
            };
            if slot.as_set() == Some(&previous) {
                *slot = StyleValue::Set(current);
                updated += 1;
                self.changed.emit(attr);
            }
        }
        updated
    }

    /// Write this style as a `<style/>` element.
    ///
    /// Nothing is written for an empty style. The name attribute is padded to
    /// `width` characters so sibling attribute blocks line up, and color
    /// attributes matching a declared color are written by that color's name.
    pub fn serialize(&self, out: &mut XmlOut, colors: &ColorNames, width: usize) {
        if self.is_empty() {
            return;
        }

        out.begin_element("style");
        out.attribute("name", &self.name);
        out.pad(width.saturating_sub(self.name.chars().count()));

        for attr in StyleAttribute::ALL {
            let StyleValue::Set(value) = self.get(attr) else {
                continue;
            };
            match value {
                AttributeValue::Color(rgba) => match colors.lookup(&rgba) {
                    Some(name) => out.attribute(attr.name(), name),
                    None => out.attribute(attr.name(), &rgba.to_hex()),
                },
                AttributeValue::Flag(b) => out.attribute(attr.name(), if b { "true" } else { "false" }),
                AttributeValue::Weight(w) => out.attribute(attr.name(), &w.to_string()),
                AttributeValue::Underline(u) => out.attribute(attr.name(), u.nick()),
                AttributeValue::Scale(s) => out.attribute(attr.name(), &s.to_string()),
                AttributeValue::UseStyle(s) => out.attribute(attr.name(), &s),
            }
        }

        out.end_empty_element();
    }
}
