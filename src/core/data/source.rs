use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// A source file read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    /// Invalid UTF-8 sequences were replaced while decoding, so `content` cannot be written back.
    pub lossy: bool,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            lossy: false,
        }
    }

    /// Read a file, replacing invalid UTF-8 sequences with U+FFFD.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
        let file = match String::from_utf8(bytes) {
            Ok(content) => Self::new(path, content),
            Err(e) => Self {
                lossy: true,
                ..Self::new(path, String::from_utf8_lossy(e.as_bytes()))
            },
        };
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::core::data::source::*;

    #[test]
    fn test_read_utf8_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("view.html");
        fs::write(&path, "<p>Café</p>").unwrap();

        let file = SourceFile::read(&path).unwrap();
        assert_eq!(file.content, "<p>Café</p>");
        assert!(!file.lossy);
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.html");
        fs::write(&path, b"<p>Caf\xe9</p>").unwrap();

        let file = SourceFile::read(&path).unwrap();
        assert_eq!(file.content, "<p>Caf\u{fffd}</p>");
        assert!(file.lossy);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(SourceFile::read(&dir.path().join("absent.js")).is_err());
    }
}
