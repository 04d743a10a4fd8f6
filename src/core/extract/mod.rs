//! Usage extraction: recovering the translation keys a module references.
//!
//! Both source dialects go through the same [`UsageExtractor`] seam. Each usage carries a
//! [`KeySite`] so that the rewrite phase can rename keys in place by re-running the same
//! traversal.

pub mod classifier;
pub mod markup;
pub mod script;
pub mod site;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::data::{SkippedFile, SourceFile, SourceKind, UsageKey};

pub use classifier::{ExpressionClassifier, classify};
pub use markup::MarkupExtractor;
pub use script::ScriptExtractor;
pub use site::{DEFAULT_QUOTE, KeySite, KeyUsage};

/// Names under which the translation API appears in sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Injection token of the translation service (`$translate`).
    pub service: String,
    /// Synchronous lookup method of the service (`instant`).
    pub method: String,
    /// Template filter (`translate`).
    pub filter: String,
    /// Directive attribute, without its `data-` prefix (`translate`).
    pub directive: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            service: "$translate".to_string(),
            method: "instant".to_string(),
            filter: classifier::DEFAULT_FILTER.to_string(),
            directive: "translate".to_string(),
        }
    }
}

/// Keys found across a set of files, plus the files that could not be parsed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Sorted and de-duplicated.
    pub keys: Vec<UsageKey>,
    pub skipped: Vec<SkippedFile>,
}

pub trait UsageExtractor {
    fn kind(&self) -> SourceKind;

    /// Every usage in one file, with sites relative to `source`.
    fn usages(&self, path: &Path, source: &str) -> Result<Vec<KeyUsage>>;

    /// Keys used across `files`. A file that fails to parse is recorded and skipped.
    fn extract(&self, files: &[SourceFile]) -> Extraction {
        let mut keys = BTreeSet::new();
        let mut skipped = Vec::new();

        for file in files {
            match self.usages(&file.path, &file.content) {
                Ok(usages) => {
                    keys.extend(
                        usages
                            .into_iter()
                            .map(|usage| usage.key)
                            .filter(|key| !key.is_empty()),
                    );
                }
                Err(e) => skipped.push(SkippedFile::new(&file.path, self.kind(), e.to_string())),
            }
        }

        Extraction {
            keys: keys.into_iter().collect(),
            skipped,
        }
    }

    /// Read and extract `paths`. Unreadable files are skipped like unparsable ones.
    fn extract_paths(&self, paths: &[PathBuf]) -> Extraction {
        let mut files = Vec::with_capacity(paths.len());
        let mut unreadable = Vec::new();
        for path in paths {
            match SourceFile::read(path) {
                Ok(file) => files.push(file),
                Err(e) => unreadable.push(SkippedFile::new(path, self.kind(), e.to_string())),
            }
        }

        let mut extraction = self.extract(&files);
        unreadable.append(&mut extraction.skipped);
        extraction.skipped = unreadable;
        extraction
    }
}
