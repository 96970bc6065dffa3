//! Logging facilities for Tincture.
//!
//! Tincture uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! The constants below name the spans and targets emitted by the Tincture
//! crates, for use in `tracing` filter directives such as
//! `RUST_LOG=tincture_scheme::parser=warn`.

/// Span names used throughout Tincture for tracing.
pub mod span_names {
    /// Parsing a scheme document.
    pub const LOAD: &str = "tincture::load";
    /// Serializing a scheme document.
    pub const SERIALIZE: &str = "tincture::serialize";
    /// Importing a palette into a document.
    pub const IMPORT_PALETTE: &str = "tincture::import_palette";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "tincture_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "tincture_core::signal";
    /// Scheme markup parser target.
    pub const PARSER: &str = "tincture_scheme::parser";
    /// Scheme serializer target.
    pub const WRITER: &str = "tincture_scheme::writer";
    /// Document mutation target.
    pub const DOCUMENT: &str = "tincture_scheme::document";
    /// Palette import target.
    pub const PALETTE: &str = "tincture_scheme::palette";
    /// Configuration loading target.
    pub const CONFIG: &str = "tincture_scheme::config";
}
