//! GIMP palette reader.
//!
//! ```text
//! GIMP Palette
//! Name: Solarized
//! Columns: 3
//! #
//!   0  43  54	solarized-base03
//! 181 137   0	solarized-yellow
//! ```
//!
//! The first non-blank line must be `GIMP Palette`. Header lines run up to the
//! first line starting with `#`; every non-blank line after it must be three
//! decimal channels (0-255) followed by a name running to the end of the line.

use crate::error::PaletteError;
use crate::types::Rgba;

/// Marker expected on the first non-blank line.
pub const PALETTE_MARKER: &str = "GIMP Palette";

/// One `R G B name` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub name: String,
    pub rgba: Rgba,
}

/// A parsed palette.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    /// Value of the optional `Name:` header.
    pub name: Option<String>,
    pub entries: Vec<PaletteEntry>,
}

/// Parse palette text.
///
/// Blank input is an empty palette. Any malformed entry rejects the whole text.
pub fn parse_gimp_palette(text: &str) -> Result<Palette, PaletteError> {
    if text.trim().is_empty() {
        return Ok(Palette::default());
    }

    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let header = lines
        .by_ref()
        .map(|(_, line)| line.trim())
        .find(|line| !line.is_empty());
    if header != Some(PALETTE_MARKER) {
        return Err(PaletteError::MissingHeader);
    }

    let mut palette = Palette::default();
    let mut found_marker = false;
    for (_, line) in lines.by_ref() {
        if line.starts_with('#') {
            found_marker = true;
            break;
        }
        if let Some(name) = line.trim().strip_prefix("Name:") {
            palette.name = Some(name.trim().to_string());
        }
    }
    if !found_marker {
        return Err(PaletteError::MissingEntries);
    }

    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_entry(line).ok_or_else(|| PaletteError::InvalidEntry {
            line: number,
            content: line.to_string(),
        })?;
        palette.entries.push(entry);
    }

    Ok(palette)
}

fn parse_entry(line: &str) -> Option<PaletteEntry> {
    let mut rest = line.trim();
    let mut channels = [0u8; 3];
    for channel in &mut channels {
        let end = rest.find(char::is_whitespace)?;
        *channel = rest[..end].parse().ok()?;
        rest = rest[end..].trim_start();
    }

    let name = rest.trim_end();
    if name.is_empty() {
        return None;
    }
    let [r, g, b] = channels;
    Some(PaletteEntry {
        name: name.to_string(),
        rgba: Rgba::from_rgb8(r, g, b),
    })
}
