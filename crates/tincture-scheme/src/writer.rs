//! Deterministic scheme serializer.
//!
//! Output is stable for a given document: colors are sorted by name, styles
//! are grouped by language tag and sorted by name, and attribute blocks are
//! aligned on the longest color or style name. Style colors that equal a
//! declared color are written by that color's name.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use tincture_core::logging::{span_names, targets};

use crate::config::WriterConfig;
use crate::document::SchemeDocument;
use crate::language::LanguageRegistry;
use crate::style::Style;
use crate::types::Rgba;

const LICENSE_NOTICE: &str = "\
  This style scheme is free software; you can redistribute it and/or
  modify it under the terms of the GNU Lesser General Public
  License as published by the Free Software Foundation; either
  version 2.1 of the License, or (at your option) any later version.

  This style scheme is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
  Lesser General Public License for more details.

  You should have received a copy of the GNU Lesser General Public License
  along with this library; if not, see <http://www.gnu.org/licenses/>.
";

/// Small append-only markup builder.
#[derive(Debug, Default)]
pub struct XmlOut {
    buf: String,
}

impl XmlOut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    /// Append `n` spaces.
    pub fn pad(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat_n(' ', n));
    }

    /// `<name`
    pub fn begin_element(&mut self, name: &str) {
        self.buf.push('<');
        self.buf.push_str(name);
    }

    /// ` key="value"`, with the value escaped.
    pub fn attribute(&mut self, key: &str, value: &str) {
        self.buf.push(' ');
        self.buf.push_str(key);
        self.buf.push_str("=\"");
        self.buf.push_str(&quick_xml::escape::escape(value));
        self.buf.push('"');
    }

    /// `>`
    pub fn end_start_element(&mut self) {
        self.buf.push('>');
    }

    /// `/>`
    pub fn end_empty_element(&mut self) {
        self.buf.push_str("/>");
    }

    /// `<name>`
    pub fn open_element(&mut self, name: &str) {
        self.begin_element(name);
        self.end_start_element();
    }

    /// `</name>`
    pub fn close_element(&mut self, name: &str) {
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(&quick_xml::escape::escape(text));
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.open_element(name);
        self.text(text);
        self.close_element(name);
    }

    /// `<!-- text -->`
    pub fn comment(&mut self, text: &str) {
        self.buf.push_str("<!-- ");
        self.buf.push_str(&sanitize_comment(text));
        self.buf.push_str(" -->");
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// `--` may not appear inside a comment.
fn sanitize_comment(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}

/// Lookup from a color value to the name it was declared under.
///
/// Keyed by [`Rgba::to_css_string`]; when several colors share a value the
/// first one inserted keeps the key.
#[derive(Debug, Default, Clone)]
pub struct ColorNames {
    by_value: HashMap<String, String>,
}

impl ColorNames {
    /// Register a name for a value. Returns `false` if the value already had one.
    pub fn insert(&mut self, value: &Rgba, name: &str) -> bool {
        match self.by_value.entry(value.to_css_string()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(name.to_string());
                true
            }
        }
    }

    pub fn lookup(&self, value: &Rgba) -> Option<&str> {
        self.by_value.get(&value.to_css_string()).map(String::as_str)
    }
}

/// Sort key for a style: untagged styles first, then `def:` styles, then
/// the remaining languages grouped by tag. Names order each group.
fn style_sort_key(style: &Style) -> (u8, &str, &str) {
    let (rank, tag) = match style.language() {
        None => (0, ""),
        Some("def") => (1, ""),
        Some(tag) => (2, tag),
    };
    (rank, tag, style.name())
}

/// Reorder each language group so that every style comes after the style
/// named by its `use-style`, when that style is in the same group.
///
/// Styles keep their sorted order otherwise. A cycle is broken at the first
/// style of the cycle reached in sorted order.
fn place_aliases_after_targets(styles: Vec<&Style>) -> Vec<&Style> {
    let mut ordered = Vec::with_capacity(styles.len());
    for group in styles.chunk_by(|a, b| a.language() == b.language()) {
        let mut placed = vec![false; group.len()];
        for start in 0..group.len() {
            let mut chain = Vec::new();
            let mut current = Some(start);
            while let Some(index) = current {
                if placed[index] || chain.contains(&index) {
                    break;
                }
                chain.push(index);
                current = group[index]
                    .use_style_alias()
                    .and_then(|target| group.iter().position(|s| s.name() == target));
            }
            for &index in chain.iter().rev() {
                placed[index] = true;
                ordered.push(group[index]);
            }
        }
    }
    ordered
}

/// Serialize a document to scheme markup.
pub fn serialize(
    document: &SchemeDocument,
    config: &WriterConfig,
    languages: Option<&dyn LanguageRegistry>,
) -> String {
    let _span = tracing::debug_span!(target: targets::WRITER, span_names::SERIALIZE).entered();
    let mut out = XmlOut::new();

    out.raw("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    if config.license_header {
        write_license_header(&mut out, document, config);
    }

    out.begin_element("style-scheme");
    out.attribute("id", non_empty_or(document.id(), "unknown"));
    out.attribute("_name", non_empty_or(document.name(), "unknown"));
    out.attribute("version", "1.0");
    out.end_start_element();
    out.newline();

    out.pad(2);
    out.text_element("author", document.author());
    out.newline();
    out.pad(2);
    out.text_element("_description", document.description());
    out.newline();

    out.newline();
    out.pad(2);
    out.open_element("metadata");
    out.newline();
    out.raw("    <property name=\"variant\">");
    out.raw(if document.is_dark() { "dark" } else { "light" });
    out.raw("</property>\n");
    if let Some(alternate) = document.alternate() {
        out.pad(4);
        out.begin_element("property");
        out.attribute(
            "name",
            if document.is_dark() {
                "light-variant"
            } else {
                "dark-variant"
            },
        );
        out.end_start_element();
        out.text(alternate);
        out.close_element("property");
        out.newline();
    }
    out.pad(2);
    out.close_element("metadata");
    out.newline();
    out.newline();

    // A color without a value is written as transparent so the name survives.
    let mut colors: Vec<(&str, Rgba)> = document
        .colors()
        .iter()
        .map(|(_, color)| (color.name(), color.value().unwrap_or(Rgba::TRANSPARENT)))
        .collect();
    colors.sort_by(|a, b| a.0.cmp(b.0));

    let mut styles: Vec<&Style> = document.styles().filter(|s| !s.is_empty()).collect();
    styles.sort_by(|a, b| style_sort_key(a).cmp(&style_sort_key(b)));
    let styles = place_aliases_after_targets(styles);

    let width = colors
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(styles.iter().map(|s| s.name().chars().count()))
        .max()
        .unwrap_or(0);

    let mut names = ColorNames::default();
    let mut declared = HashSet::new();
    out.pad(2);
    out.comment("Named Colors");
    out.newline();
    for (name, value) in &colors {
        out.pad(2);
        out.begin_element("color");
        out.attribute("name", name);
        out.pad(width.saturating_sub(name.chars().count()));
        out.attribute("value", &value.to_hex());
        out.end_empty_element();
        out.newline();
        // Later colors sharing a name are unreachable by name on reload.
        if declared.insert(*name) {
            names.insert(value, name);
        }
    }

    out.newline();
    out.pad(2);
    out.comment("Global Styles");
    out.newline();

    let mut last_language: Option<&str> = None;
    for style in &styles {
        let language = style.language();
        if language != last_language {
            if let Some(tag) = language {
                let title = languages
                    .and_then(|registry| registry.display_name(tag))
                    .unwrap_or_else(|| tag.to_string());
                out.newline();
                out.pad(2);
                out.comment(&title);
                out.newline();
            }
            last_language = language;
        }
        out.pad(2);
        style.serialize(&mut out, &names, width);
        out.newline();
    }

    out.newline();
    out.close_element("style-scheme");
    out.newline();

    tracing::debug!(
        target: targets::WRITER,
        colors = colors.len(),
        styles = styles.len(),
        "serialized scheme"
    );
    out.into_string()
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn write_license_header(out: &mut XmlOut, document: &SchemeDocument, config: &WriterConfig) {
    let year = config
        .copyright_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let author = match document.author() {
        "" => config.fallback_author.as_deref().unwrap_or(""),
        author => author,
    };

    out.raw("<!--\n\n");
    out.raw(&sanitize_comment(&format!("  Copyright {year} {author}")));
    out.raw("\n\n");
    out.raw(LICENSE_NOTICE);
    out.raw("\n-->\n");
}
