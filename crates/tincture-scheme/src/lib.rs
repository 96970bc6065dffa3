//! Style-scheme documents for syntax highlighting.
//!
//! A scheme is a set of named colors plus a set of named highlight styles,
//! stored as a small XML dialect. This crate provides:
//!
//! - **Document model**: [`SchemeDocument`] owning a [`ColorRegistry`] and
//!   [`Style`]s whose attributes are tri-state ([`StyleValue`])
//! - **Parser**: error-tolerant reading of scheme markup with per-attribute
//!   warnings ([`LoadReport`])
//! - **Writer**: stable, sorted, column-aligned output that refers to
//!   declared colors by name
//! - **Palette import**: GIMP `.gpl` palettes as bulk color input
//!
//! # Example
//!
//! ```
//! use tincture_scheme::prelude::*;
//!
//! let mut document = SchemeDocument::new();
//! document
//!     .load(br##"<style-scheme id="x"><author>A</author>
//!         <color name="bg" value="#ffffff"/>
//!         <style name="text" background="bg"/></style-scheme>"##)
//!     .unwrap();
//!
//! assert_eq!(document.find_named_color("bg"), Some(Rgba::WHITE));
//! assert!(document.to_text().contains(r#"background="bg""#));
//! ```

pub mod types;
pub mod color;
pub mod style;
pub mod document;
pub mod parser;
pub mod writer;
pub mod palette;
pub mod language;
pub mod preview;
pub mod config;
pub mod io;

mod error;

pub use error::{Error, PaletteError, ParseErrorKind, Result};

pub use color::{Color, ColorChange, ColorId, ColorRegistry};
pub use config::WriterConfig;
pub use document::SchemeDocument;
pub use language::{LanguageRegistry, StaticLanguageRegistry};
pub use palette::{Palette, PaletteEntry};
pub use parser::{AttributeWarning, LoadReport};
pub use preview::PreviewRenderer;
pub use style::{AttributeValue, Style, StyleAttribute};
pub use types::{FontWeight, Rgba, StyleValue, Underline};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::color::{Color, ColorId};
    pub use crate::config::WriterConfig;
    pub use crate::document::SchemeDocument;
    pub use crate::language::{LanguageRegistry, StaticLanguageRegistry};
    pub use crate::parser::LoadReport;
    pub use crate::preview::PreviewRenderer;
    pub use crate::style::{AttributeValue, Style, StyleAttribute};
    pub use crate::types::{FontWeight, Rgba, StyleValue, Underline};
}
