//! File access for scheme documents.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Read a whole file, mapping failures to [`Error::Io`].
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Writes a file atomically.
///
/// Data goes to a temporary file next to the target, which is synced and then
/// renamed over the target on [`commit`](Self::commit). If the writer is
/// dropped without committing, the temporary file is removed and the target
/// is left untouched.
pub struct AtomicWriter {
    target_path: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<fs::File>>,
}

impl AtomicWriter {
    /// Create the temporary file for `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let target_path = path.as_ref().to_path_buf();
        let parent = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = target_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "scheme".to_string());
        let temp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

        let file = fs::File::create(&temp_path).map_err(|e| Error::io(&target_path, e))?;
        Ok(Self {
            target_path,
            temp_path,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Write `contents` to `path` in one step.
    pub fn write(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
        let mut writer = Self::new(path)?;
        writer.write_all(contents)?;
        writer.commit()
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Append bytes to the temporary file.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(Error::io(
                &self.target_path,
                std::io::Error::other("atomic writer already finished"),
            ));
        };
        writer
            .write_all(buf)
            .map_err(|e| Error::io(&self.target_path, e))
    }

    /// Flush, sync and rename the temporary file over the target.
    pub fn commit(mut self) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer
            .flush()
            .map_err(|e| Error::io(&self.target_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| Error::io(&self.target_path, e))?;
        drop(writer);

        fs::rename(&self.temp_path, &self.target_path).map_err(|e| {
            let _ = fs::remove_file(&self.temp_path);
            Error::io(&self.target_path, e)
        })
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheme.xml");
        fs::write(&path, "old").unwrap();

        AtomicWriter::write(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_drop_without_commit_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheme.xml");
        fs::write(&path, "old").unwrap();

        {
            let mut writer = AtomicWriter::new(&path).unwrap();
            writer.write_all(b"partial").unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scheme.xml");
        let err = AtomicWriter::write(&path, b"x").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(read_file(&path).is_err());
    }
}
