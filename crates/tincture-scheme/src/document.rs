//! The scheme document: metadata, colors and styles.
//!
//! A [`SchemeDocument`] owns a [`ColorRegistry`] and a map of [`Style`]s keyed
//! by name. Every mutation that changes observable state emits the document's
//! [`changed`](SchemeDocument::changed) signal, including edits made directly
//! on a style obtained from [`get_or_create_style`](SchemeDocument::get_or_create_style).
//!
//! Recoloring a named color walks every style and replaces attributes holding
//! the old value before [`set_color_rgba`](SchemeDocument::set_color_rgba)
//! returns.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tincture_core::Signal;
use tincture_core::logging::{span_names, targets};

use crate::color::{Color, ColorId, ColorRegistry};
use crate::config::WriterConfig;
use crate::error::Result;
use crate::io::{read_file, AtomicWriter};
use crate::language::LanguageRegistry;
use crate::palette;
use crate::parser::{self, LoadReport};
use crate::preview::PreviewRenderer;
use crate::style::Style;
use crate::types::Rgba;
use crate::writer;

/// An editable style scheme.
#[derive(Debug)]
pub struct SchemeDocument {
    id: String,
    name: String,
    description: String,
    author: String,
    dark: bool,
    alternate: Option<String>,
    source_version: Option<String>,
    colors: ColorRegistry,
    styles: BTreeMap<String, Style>,
    origin: Option<PathBuf>,
    changed: Arc<Signal<()>>,
}

impl Default for SchemeDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn replace_if_changed(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl SchemeDocument {
    /// Create an empty, pristine document.
    pub fn new() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            author: String::new(),
            dark: false,
            alternate: None,
            source_version: None,
            colors: ColorRegistry::new(),
            styles: BTreeMap::new(),
            origin: None,
            changed: Arc::new(Signal::new()),
        }
    }

    /// Emitted after any change to the document or one of its styles.
    pub fn changed(&self) -> &Arc<Signal<()>> {
        &self.changed
    }

    fn notify(&self, changed: bool) -> bool {
        if changed {
            self.changed.emit(());
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.id, id.into());
        self.notify(changed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.name, name.into());
        self.notify(changed)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.description, description.into());
        self.notify(changed)
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.author, author.into());
        self.notify(changed)
    }

    /// Whether this is the dark variant of a scheme.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) -> bool {
        let changed = self.dark != dark;
        self.dark = dark;
        self.notify(changed)
    }

    /// Id of the companion light or dark scheme. Not checked for existence.
    pub fn alternate(&self) -> Option<&str> {
        self.alternate.as_deref()
    }

    /// Set the companion scheme id. An empty id removes it.
    pub fn set_alternate(&mut self, alternate: impl Into<String>) -> bool {
        let alternate = Some(alternate.into()).filter(|id| !id.is_empty());
        let changed = self.alternate != alternate;
        self.alternate = alternate;
        self.notify(changed)
    }

    /// The `version` attribute the document was loaded with.
    pub fn source_version(&self) -> Option<&str> {
        self.source_version.as_deref()
    }

    pub(crate) fn set_source_version(&mut self, version: Option<&str>) {
        self.source_version = version.filter(|v| !v.is_empty()).map(str::to_owned);
    }

    /// The file this document was loaded from or last saved to.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn set_origin(&mut self, origin: Option<PathBuf>) {
        self.origin = origin;
    }

    /// True when the document has no origin and no meaningful content, so
    /// it can be replaced without asking.
    pub fn is_pristine(&self) -> bool {
        self.origin.is_none()
            && self.colors.is_empty()
            && self.styles.values().all(Style::is_empty)
            && self.id.is_empty()
            && self.name.is_empty()
            && self.description.is_empty()
            && self.alternate.is_none()
    }

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    pub fn add_color(&mut self, color: Color) -> ColorId {
        let id = self.colors.append(color);
        self.changed.emit(());
        id
    }

    /// Remove a color. Its change observers are disconnected.
    pub fn remove_color(&mut self, id: ColorId) -> Option<Color> {
        let color = self.colors.remove(id)?;
        self.changed.emit(());
        Some(color)
    }

    pub fn rename_color(&mut self, id: ColorId, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.colors.get(id).is_none_or(|color| color.name() == name) {
            return false;
        }
        let renamed = self.colors.rename(id, name);
        self.notify(renamed)
    }

    /// Change a color's value and carry the change over to every style.
    ///
    /// Each style color attribute holding the previous value is switched to
    /// the new one. Returns `false` when the id is unknown or the value is
    /// unchanged.
    pub fn set_color_rgba(&mut self, id: ColorId, value: Option<Rgba>) -> bool {
        let Some(change) = self.colors.set_rgba(id, value) else {
            return false;
        };

        if let (Some(previous), Some(current)) = (change.previous, change.current) {
            let updated: usize = self
                .styles
                .values_mut()
                .map(|style| style.on_color_value_replaced(previous, current))
                .sum();
            tracing::debug!(
                target: targets::DOCUMENT,
                %previous,
                %current,
                updated,
                "recolored style attributes"
            );
        }

        self.changed.emit(());
        true
    }

    /// The value of the first color with this name.
    pub fn find_named_color(&self, name: &str) -> Option<Rgba> {
        self.colors.find_by_name(name).and_then(Color::value)
    }

    /// Append every color of a GIMP palette.
    ///
    /// The palette is parsed completely before anything is added, so a
    /// malformed entry leaves the document untouched.
    pub fn import_palette(&mut self, text: &str) -> Result<()> {
        let _span = tracing::debug_span!(target: targets::PALETTE, span_names::IMPORT_PALETTE)
            .entered();

        let palette = palette::parse_gimp_palette(text).inspect_err(|error| {
            tracing::warn!(target: targets::PALETTE, %error, "rejected palette");
        })?;
        if palette.entries.is_empty() {
            return Ok(());
        }

        let count = palette.entries.len();
        self.colors.extend(
            palette
                .entries
                .into_iter()
                .map(|entry| Color::with_rgba(entry.name, entry.rgba)),
        );
        tracing::debug!(
            target: targets::PALETTE,
            count,
            name = palette.name.as_deref().unwrap_or(""),
            "imported palette"
        );
        self.changed.emit(());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Styles
    // -------------------------------------------------------------------------

    /// Iterate styles ordered by name, empty ones included.
    pub fn styles(&self) -> impl Iterator<Item = &Style> + '_ {
        self.styles.values()
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn style_mut(&mut self, name: &str) -> Option<&mut Style> {
        self.styles.get_mut(name)
    }

    /// Return the named style, creating an empty one if needed.
    ///
    /// New styles are wired so that any change to them also emits the
    /// document's `changed` signal.
    pub fn get_or_create_style(&mut self, name: &str) -> &mut Style {
        let document_changed = &self.changed;
        self.styles.entry(name.to_owned()).or_insert_with(|| {
            let style = Style::new(name);
            let forward = Arc::downgrade(document_changed);
            style.changed().connect(move |_| {
                if let Some(signal) = forward.upgrade() {
                    signal.emit(());
                }
            });
            style
        })
    }

    /// Pre-create the well-known styles of a language. Returns how many
    /// styles were created.
    pub fn ensure_language_styles(&mut self, languages: &dyn LanguageRegistry, tag: &str) -> usize {
        let mut created = 0;
        for id in languages.style_ids(tag) {
            if !self.styles.contains_key(&id) {
                self.get_or_create_style(&id);
                created += 1;
            }
        }
        created
    }

    // -------------------------------------------------------------------------
    // Loading and saving
    // -------------------------------------------------------------------------

    /// Populate this document from scheme markup.
    ///
    /// Parsing always runs to the end of the input. Everything that could be
    /// read is applied even when an error is returned; the error then points
    /// at the first structural problem. The `changed` signal is emitted once
    /// when parsing finishes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<LoadReport> {
        self.changed.set_blocked(true);
        let result = parser::parse_into(self, bytes);
        self.changed.set_blocked(false);
        self.changed.emit(());
        result
    }

    /// Load a scheme file and remember it as the origin.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let report = self.load(&bytes)?;
        self.origin = Some(path.to_path_buf());
        tracing::debug!(
            target: targets::DOCUMENT,
            path = %path.display(),
            warnings = report.warnings.len(),
            "loaded scheme"
        );
        Ok(report)
    }

    /// Serialize with the default [`WriterConfig`].
    pub fn to_text(&self) -> String {
        self.to_text_with(&WriterConfig::default(), None)
    }

    /// Serialize with explicit settings and an optional language registry
    /// for section headers.
    pub fn to_text_with(
        &self,
        config: &WriterConfig,
        languages: Option<&dyn LanguageRegistry>,
    ) -> String {
        writer::serialize(self, config, languages)
    }

    /// Atomically write the document to `path` and make it the origin.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to_file_with(path, &WriterConfig::default())
    }

    pub fn save_to_file_with(&mut self, path: impl AsRef<Path>, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_text_with(config, None);
        AtomicWriter::write(path, text.as_bytes())?;
        self.origin = Some(path.to_path_buf());
        tracing::debug!(target: targets::DOCUMENT, path = %path.display(), "saved scheme");
        Ok(())
    }

    /// Hand the serialized document to a preview renderer.
    pub fn preview<R: PreviewRenderer>(&self, renderer: &R) -> Result<R::Handle> {
        renderer.render(&self.to_text(), &self.id)
    }
}
