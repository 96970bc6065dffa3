//! Error types for scheme documents.

use std::path::PathBuf;

/// Result type alias for scheme operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving a scheme.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A structural violation of the scheme grammar.
    ///
    /// Only the first violation in a document is reported, even though the
    /// parser keeps going to the end.
    #[error("Failed to parse style-scheme at {line}:{column}: {kind}")]
    Parse {
        line: u32,
        column: u32,
        kind: ParseErrorKind,
    },

    /// The input is not well-formed markup (or not UTF-8).
    #[error("Malformed markup at {line}:{column}: {message}")]
    Malformed {
        message: String,
        line: u32,
        column: u32,
    },

    /// Palette text was rejected by the importer.
    #[error("Not a GIMP palette: {0}")]
    Palette(#[from] PaletteError),

    /// File I/O error.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value of the wrong type for a style attribute.
    #[error("Invalid value for attribute '{attribute}': {message}")]
    InvalidValue { attribute: String, message: String },

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// The preview renderer reported a failure.
    #[error("Preview failed: {message}")]
    Preview { message: String },
}

impl Error {
    /// Create a structural parse error.
    pub fn parse(kind: ParseErrorKind, line: u32, column: u32) -> Self {
        Self::Parse { line, column, kind }
    }

    /// Create a malformed-markup error.
    pub fn malformed(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Malformed {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a preview error.
    pub fn preview(message: impl Into<String>) -> Self {
        Self::Preview {
            message: message.into(),
        }
    }

    /// The 1-based `(line, column)` this error points at, when it has one.
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            Error::Parse { line, column, .. } | Error::Malformed { line, column, .. } => {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

/// What kind of structural violation a [`Error::Parse`] describes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// An element that is not allowed where it appears.
    #[error("unexpected element <{element}>")]
    UnexpectedElement { element: String },

    /// A required attribute is absent.
    #[error("element <{element}> requires attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute outside the element's allow-list.
    #[error("element <{element}> does not accept attribute '{attribute}'")]
    UnknownAttribute { element: String, attribute: String },

    /// A named color whose value cannot be parsed.
    #[error("color '{name}' has invalid value '{value}'")]
    InvalidColor { name: String, value: String },
}

/// Reasons palette text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// The first non-blank line is not `GIMP Palette`.
    #[error("missing \"GIMP Palette\" header")]
    MissingHeader,

    /// No `#` line separates the header from the color entries.
    #[error("missing '#' line before the color entries")]
    MissingEntries,

    /// An entry line does not have the `R G B name` shape.
    #[error("line {line}: expected \"R G B name\", found {content:?}")]
    InvalidEntry { line: usize, content: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_carries_position() {
        let err = Error::parse(
            ParseErrorKind::UnexpectedElement {
                element: "bogus".into(),
            },
            3,
            5,
        );
        assert_eq!(
            err.to_string(),
            "Failed to parse style-scheme at 3:5: unexpected element <bogus>"
        );
        assert_eq!(err.location(), Some((3, 5)));
    }

    #[test]
    fn palette_error_converts() {
        let err: Error = PaletteError::MissingHeader.into();
        assert!(matches!(err, Error::Palette(PaletteError::MissingHeader)));
        assert_eq!(err.location(), None);
    }
}
