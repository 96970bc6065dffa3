//! Preview renderer collaborator.

use crate::error::Result;

/// Turns serialized scheme text into something that can highlight a preview.
///
/// The document engine knows nothing about the implementation; it hands over
/// the text produced by the serializer together with the scheme id.
pub trait PreviewRenderer {
    /// Whatever the renderer hands back for highlighting.
    type Handle;

    /// Render `document` (scheme markup) registered under `scheme_id`.
    fn render(&self, document: &str, scheme_id: &str) -> Result<Self::Handle>;
}
