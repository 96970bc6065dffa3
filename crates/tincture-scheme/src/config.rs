//! Serializer configuration.
//!
//! Settings can be built in code or read from TOML:
//!
//! ```toml
//! license_header = true
//! copyright_year = 2024
//! fallback_author = "Jane Doe"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tincture_core::logging::targets;

use crate::error::{Error, Result};

/// Options controlling how a scheme is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Emit the copyright and license comment block.
    pub license_header: bool,
    /// Year printed in the copyright line; the current local year when absent.
    pub copyright_year: Option<i32>,
    /// Name printed in the copyright line when the document has no author.
    pub fallback_author: Option<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            license_header: true,
            copyright_year: None,
            fallback_author: None,
        }
    }
}

impl WriterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Read a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded writer config");
        Ok(config)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }
}
