//! Attribute collection and the typed attribute parsers.

use quick_xml::events::BytesStart;

use crate::document::SchemeDocument;
use crate::error::ParseErrorKind;
use crate::style::{AttributeValue, StyleAttribute};
use crate::types::{parse_boolean, scale, FontWeight, Rgba, Underline};

use super::AttributeWarning;

/// Why an element's attribute list was refused.
#[derive(Debug)]
pub(super) enum Rejection {
    /// The tokenizer could not read the attribute list.
    Malformed(String),
    /// The attributes do not fit the element's grammar.
    Structural(ParseErrorKind),
}

/// Attribute values of one element, checked against an allow-list.
#[derive(Debug, Default)]
pub(super) struct Attributes {
    values: Vec<(&'static str, String)>,
}

impl Attributes {
    /// Read the attributes of `start`.
    ///
    /// Every attribute must appear in `allowed` and every name in `required`
    /// must be present.
    pub(super) fn collect(
        start: &BytesStart<'_>,
        element: &str,
        allowed: &[&'static str],
        required: &[&'static str],
    ) -> Result<Self, Rejection> {
        let mut values = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Rejection::Malformed(e.to_string()))?;
            let key = attr.key.as_ref();
            let Some(name) = allowed.iter().find(|name| name.as_bytes() == key) else {
                return Err(Rejection::Structural(ParseErrorKind::UnknownAttribute {
                    element: element.to_string(),
                    attribute: String::from_utf8_lossy(key).into_owned(),
                }));
            };
            let value = attr
                .unescape_value()
                .map_err(|e| Rejection::Malformed(e.to_string()))?;
            values.push((*name, value.into_owned()));
        }

        let attributes = Self { values };
        if let Some(missing) = required.iter().find(|name| attributes.get(name).is_none()) {
            return Err(Rejection::Structural(ParseErrorKind::MissingAttribute {
                element: element.to_string(),
                attribute: (*missing).to_string(),
            }));
        }
        Ok(attributes)
    }

    pub(super) fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`get`](Self::get), treating an empty value as absent.
    pub(super) fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

/// Attributes accepted on `<style>`, besides `name`.
pub(super) const STYLE_ATTRIBUTES: [&str; 12] = [
    "name",
    "background",
    "foreground",
    "line-background",
    "bold",
    "weight",
    "italic",
    "underline",
    "underline-color",
    "scale",
    "strikethrough",
    "use-style",
];

/// Resolve a color attribute.
///
/// Values starting with `#` are literal colors. Anything else names a color
/// declared earlier in the document, falling back to the literal syntaxes.
pub(super) fn resolve_color(document: &SchemeDocument, value: &str) -> Option<Rgba> {
    if value.starts_with('#') {
        return Rgba::parse(value);
    }
    document
        .find_named_color(value)
        .or_else(|| Rgba::parse(value))
}

fn parse_value(
    document: &SchemeDocument,
    attr: StyleAttribute,
    value: &str,
) -> Result<AttributeValue, &'static str> {
    match attr {
        StyleAttribute::Background
        | StyleAttribute::Foreground
        | StyleAttribute::LineBackground
        | StyleAttribute::UnderlineColor => resolve_color(document, value)
            .map(AttributeValue::Color)
            .ok_or("not a color value or declared color name"),
        StyleAttribute::Bold | StyleAttribute::Italic | StyleAttribute::Strikethrough => {
            parse_boolean(value)
                .map(AttributeValue::Flag)
                .ok_or("not a boolean")
        }
        StyleAttribute::Weight => FontWeight::parse(value)
            .map(AttributeValue::Weight)
            .ok_or("not a weight name or a number from 1 to 1000"),
        StyleAttribute::Underline => Underline::parse(value)
            .map(AttributeValue::Underline)
            .ok_or("not an underline style"),
        StyleAttribute::Scale => scale::parse(value)
            .map(AttributeValue::Scale)
            .ok_or("not a named scale or a positive number"),
        StyleAttribute::UseStyle => Ok(AttributeValue::UseStyle(value.to_string())),
    }
}

/// Apply the attributes of a `<style>` element.
///
/// Attributes whose value cannot be parsed are left untouched and reported
/// as warnings; the rest of the style is still applied.
pub(super) fn apply_style(
    document: &mut SchemeDocument,
    name: &str,
    attributes: &Attributes,
    (line, column): (u32, u32),
) -> Vec<AttributeWarning> {
    let mut warnings = Vec::new();
    let mut resolved = Vec::new();
    for attr in StyleAttribute::ALL {
        let Some(raw) = attributes.non_empty(attr.name()) else {
            continue;
        };
        match parse_value(document, attr, raw) {
            Ok(value) => resolved.push((attr, value)),
            Err(reason) => warnings.push(AttributeWarning {
                line,
                column,
                style: name.to_string(),
                attribute: attr,
                value: raw.to_string(),
                reason: reason.to_string(),
            }),
        }
    }

    let style = document.get_or_create_style(name);
    for (attr, value) in resolved {
        if let Err(error) = style.set(attr, value) {
            warnings.push(AttributeWarning {
                line,
                column,
                style: name.to_string(),
                attribute: attr,
                value: attributes.get(attr.name()).unwrap_or_default().to_string(),
                reason: error.to_string(),
            });
        }
    }
    warnings
}
