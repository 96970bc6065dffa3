//! Scheme markup parser.
//!
//! A pull parser over `quick-xml` events driving a stack of element
//! contexts:
//!
//! ```text
//! Root ── <style-scheme> ──▶ Scheme ── <author>, <description> ──▶ Text
//!                                   ── <metadata> ──▶ Metadata ── <property> ──▶ Text
//!                                   ── <color>, <style> (leaves)
//! ```
//!
//! Structural problems (an element in the wrong place, a missing or unknown
//! attribute, an unreadable `<color>` value) do not stop the parse. The
//! offending element and its children are skipped, parsing continues to the
//! end of the input, and the first problem is returned afterwards. A value
//! that does not parse for one style attribute only drops that attribute and
//! is reported as an [`AttributeWarning`]. Input that is not well-formed
//! markup fails immediately.

mod attributes;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tincture_core::logging::{span_names, targets};

use crate::color::Color;
use crate::document::SchemeDocument;
use crate::error::{Error, ParseErrorKind, Result};
use crate::style::StyleAttribute;
use crate::types::Rgba;

use attributes::{apply_style, Attributes, Rejection, STYLE_ATTRIBUTES};

/// A style attribute whose value could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeWarning {
    /// 1-based line of the `<style>` element.
    pub line: u32,
    /// 1-based column of the `<style>` element.
    pub column: u32,
    pub style: String,
    pub attribute: StyleAttribute,
    pub value: String,
    pub reason: String,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadReport {
    pub warnings: Vec<AttributeWarning>,
}

impl LoadReport {
    /// True when every attribute was understood.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Author,
    Description,
    Variant,
    Alternate,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    Scheme,
    Metadata,
    Text(TextTarget),
    /// Inside `<color>` or `<style>`, which take no children.
    Leaf,
    /// Inside an element that was rejected.
    Skip,
}

/// 1-based line and column of a byte offset. Columns count characters.
fn line_column(bytes: &[u8], offset: usize) -> (u32, u32) {
    let head = &bytes[..offset.min(bytes.len())];
    let line_start = head.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
    let line = head.iter().filter(|b| **b == b'\n').count() + 1;
    let column = head[line_start..]
        .iter()
        .filter(|b| (**b & 0xC0) != 0x80)
        .count()
        + 1;
    (
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}

struct Parser<'d, 's> {
    document: &'d mut SchemeDocument,
    source: &'s str,
    stack: Vec<Context>,
    text: String,
    seen_root: bool,
    first_error: Option<Error>,
    warnings: Vec<AttributeWarning>,
}

/// Parse `bytes` into `document`.
pub(crate) fn parse_into(document: &mut SchemeDocument, bytes: &[u8]) -> Result<LoadReport> {
    let _span =
        tracing::debug_span!(target: targets::PARSER, span_names::LOAD, bytes = bytes.len())
            .entered();

    let source = std::str::from_utf8(bytes).map_err(|e| {
        let (line, column) = line_column(bytes, e.valid_up_to());
        Error::malformed(format!("invalid UTF-8: {e}"), line, column)
    })?;

    let mut parser = Parser {
        document,
        source,
        stack: vec![Context::Root],
        text: String::new(),
        seen_root: false,
        first_error: None,
        warnings: Vec::new(),
    };
    parser.run()?;

    if let Some(error) = parser.first_error {
        return Err(error);
    }
    tracing::debug!(
        target: targets::PARSER,
        colors = parser.document.colors().len(),
        warnings = parser.warnings.len(),
        "parsed scheme"
    );
    Ok(LoadReport {
        warnings: parser.warnings,
    })
}

impl Parser<'_, '_> {
    fn run(&mut self) -> Result<()> {
        let mut reader = Reader::from_str(self.source);
        reader.config_mut().trim_text(true);

        loop {
            let before = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.malformed(e.to_string(), reader.error_position() as usize)),
            };
            match event {
                Event::Start(start) => self.start_element(&start, self.tag_offset(before))?,
                Event::Empty(start) => {
                    self.start_element(&start, self.tag_offset(before))?;
                    self.end_element();
                }
                Event::End(_) => self.end_element(),
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| self.malformed(e.to_string(), before))?;
                    self.character_data(&text);
                }
                Event::CData(cdata) => self.character_data(&String::from_utf8_lossy(&cdata)),
                Event::Eof => break,
                _ => {}
            }
        }

        if self.stack.len() > 1 {
            return Err(self.malformed("unexpected end of document", self.source.len()));
        }
        if !self.seen_root && self.first_error.is_none() {
            return Err(self.malformed("document has no root element", self.source.len()));
        }
        Ok(())
    }

    /// Offset of the `<` opening the element read after `offset`.
    fn tag_offset(&self, offset: usize) -> usize {
        self.source
            .get(offset..)
            .and_then(|rest| rest.find('<'))
            .map_or(offset, |i| offset + i)
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        line_column(self.source.as_bytes(), offset)
    }

    fn malformed(&self, message: impl Into<String>, offset: usize) -> Error {
        let (line, column) = self.position(offset);
        Error::malformed(message, line, column)
    }

    /// Record a structural error. Only the first one is kept.
    fn structural(&mut self, kind: ParseErrorKind, (line, column): (u32, u32)) {
        tracing::warn!(target: targets::PARSER, line, column, error = %kind, "structural error");
        if self.first_error.is_none() {
            self.first_error = Some(Error::parse(kind, line, column));
        }
    }

    fn collect(
        &mut self,
        start: &BytesStart<'_>,
        element: &str,
        allowed: &[&'static str],
        required: &[&'static str],
        position: (u32, u32),
    ) -> Result<Option<Attributes>> {
        match Attributes::collect(start, element, allowed, required) {
            Ok(attributes) => Ok(Some(attributes)),
            Err(Rejection::Structural(kind)) => {
                self.structural(kind, position);
                Ok(None)
            }
            Err(Rejection::Malformed(message)) => {
                Err(Error::malformed(message, position.0, position.1))
            }
        }
    }

    fn start_element(&mut self, start: &BytesStart<'_>, offset: usize) -> Result<()> {
        let element = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let position = self.position(offset);
        let current = self.stack.last().copied().unwrap_or(Context::Root);

        let next = match (current, element.as_str()) {
            (Context::Skip, _) => Context::Skip,
            (Context::Root, "style-scheme") if !self.seen_root => {
                self.seen_root = true;
                self.scheme_element(start, &element, position)?
            }
            (Context::Scheme, "author") => Context::Text(TextTarget::Author),
            (Context::Scheme, "description" | "_description") => {
                Context::Text(TextTarget::Description)
            }
            (Context::Scheme, "metadata") => Context::Metadata,
            (Context::Scheme, "color") => self.color_element(start, &element, position)?,
            (Context::Scheme, "style") => self.style_element(start, &element, position)?,
            (Context::Metadata, "property") => self.property_element(start, &element, position)?,
            _ => {
                self.structural(
                    ParseErrorKind::UnexpectedElement {
                        element: element.clone(),
                    },
                    position,
                );
                Context::Skip
            }
        };

        if matches!(next, Context::Text(_)) {
            self.text.clear();
        }
        self.stack.push(next);
        Ok(())
    }

    fn end_element(&mut self) {
        let Some(context) = self.stack.pop() else {
            return;
        };
        if let Context::Text(target) = context {
            let text = std::mem::take(&mut self.text);
            self.apply_text(target, text.trim());
        }
        if self.stack.is_empty() {
            self.stack.push(Context::Root);
        }
    }

    fn character_data(&mut self, text: &str) {
        if let Some(Context::Text(_)) = self.stack.last() {
            self.text.push_str(text);
        }
    }

    fn apply_text(&mut self, target: TextTarget, text: &str) {
        if text.is_empty() {
            return;
        }
        match target {
            TextTarget::Author => {
                self.document.set_author(text);
            }
            TextTarget::Description => {
                self.document.set_description(text);
            }
            TextTarget::Variant => {
                self.document.set_dark(text == "dark");
            }
            TextTarget::Alternate => {
                self.document.set_alternate(text);
            }
            TextTarget::Ignored => {}
        }
    }

    fn scheme_element(
        &mut self,
        start: &BytesStart<'_>,
        element: &str,
        position: (u32, u32),
    ) -> Result<Context> {
        let Some(attrs) = self.collect(
            start,
            element,
            &["id", "_name", "name", "version"],
            &["id"],
            position,
        )?
        else {
            return Ok(Context::Skip);
        };

        self.document.set_id(attrs.get("id").unwrap_or_default());
        if let Some(name) = attrs.non_empty("_name").or_else(|| attrs.non_empty("name")) {
            self.document.set_name(name);
        }
        self.document.set_source_version(attrs.get("version"));
        Ok(Context::Scheme)
    }

    fn property_element(
        &mut self,
        start: &BytesStart<'_>,
        element: &str,
        position: (u32, u32),
    ) -> Result<Context> {
        let Some(attrs) = self.collect(start, element, &["name"], &["name"], position)? else {
            return Ok(Context::Skip);
        };
        let target = match attrs.get("name") {
            Some("variant") => TextTarget::Variant,
            Some("light-variant" | "dark-variant") => TextTarget::Alternate,
            _ => TextTarget::Ignored,
        };
        Ok(Context::Text(target))
    }

    fn color_element(
        &mut self,
        start: &BytesStart<'_>,
        element: &str,
        position: (u32, u32),
    ) -> Result<Context> {
        let Some(attrs) =
            self.collect(start, element, &["name", "value"], &["name", "value"], position)?
        else {
            return Ok(Context::Skip);
        };
        let name = attrs.get("name").unwrap_or_default();
        let value = attrs.get("value").unwrap_or_default();

        match Rgba::parse(value) {
            Some(rgba) => {
                self.document.add_color(Color::with_rgba(name, rgba));
                Ok(Context::Leaf)
            }
            None => {
                self.structural(
                    ParseErrorKind::InvalidColor {
                        name: name.to_string(),
                        value: value.to_string(),
                    },
                    position,
                );
                Ok(Context::Skip)
            }
        }
    }

    fn style_element(
        &mut self,
        start: &BytesStart<'_>,
        element: &str,
        position: (u32, u32),
    ) -> Result<Context> {
        let Some(attrs) = self.collect(start, element, &STYLE_ATTRIBUTES, &["name"], position)?
        else {
            return Ok(Context::Skip);
        };
        let name = attrs.get("name").unwrap_or_default();

        let warnings = apply_style(self.document, name, &attrs, position);
        for warning in &warnings {
            tracing::warn!(
                target: targets::PARSER,
                line = warning.line,
                column = warning.column,
                style = %warning.style,
                attribute = %warning.attribute,
                value = %warning.value,
                reason = %warning.reason,
                "ignoring style attribute"
            );
        }
        self.warnings.extend(warnings);
        Ok(Context::Leaf)
    }
}
