use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::data::Catalog;

/// Writes a flat catalog as a JSON object, replacing any previous content.
pub struct CatalogWriter {
    file_path: PathBuf,
}

impl CatalogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Save with 2-space indentation and a trailing newline, keeping entry order.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(catalog).context("Failed to serialize JSON")?;

        fs::write(&self.file_path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;

        Ok(())
    }
}
