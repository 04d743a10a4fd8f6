//! Renaming keys consistently in a module's catalog and sources.
//!
//! A rewrite runs in two phases: the [`RenameMap`] is computed from the module report, then
//! it is applied to every source file by re-running the extraction traversal and splicing
//! the renamed keys into the original text. A file that fails to parse is left untouched
//! and reported; files already written are not rolled back.

pub mod catalog_writer;
pub mod edit;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::core::data::{Catalog, ModuleReport, SkippedFile, SourceFile, UsageKey};
use crate::core::extract::{MarkupExtractor, ScriptExtractor, UsageExtractor, Vocabulary};

pub use catalog_writer::CatalogWriter;
pub use edit::{TextEdit, apply_edits};

const PREFIX_SEPARATOR: char = '_';

const NOT_UTF8_ERROR: &str = "File is not valid UTF-8, left unchanged";

/// Make a non-empty prefix end with `_`.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(PREFIX_SEPARATOR) {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, PREFIX_SEPARATOR)
    }
}

/// Old key to new key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameMap {
    renames: IndexMap<UsageKey, UsageKey>,
}

impl RenameMap {
    /// Prefix every used key and every compatible catalog key.
    pub fn with_prefix(used: &[UsageKey], compatible: &Catalog, prefix: &str) -> Self {
        let renames = compatible
            .keys()
            .map(|k| UsageKey::new(k.as_str()))
            .chain(used.iter().cloned())
            .map(|old| {
                let new = old.with_prefix(prefix);
                (old, new)
            })
            .collect();
        Self { renames }
    }

    pub fn get(&self, key: &UsageKey) -> Option<&UsageKey> {
        self.renames.get(key)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Rename catalog keys, keeping values and order. Keys outside the map are kept as-is.
    pub fn rename_catalog(&self, catalog: &Catalog) -> Catalog {
        catalog
            .iter()
            .map(|(k, v)| {
                let key = UsageKey::new(k.as_str());
                let renamed = self.get(&key).map_or(key.clone(), Clone::clone);
                (renamed.to_string(), v.clone())
            })
            .collect()
    }
}

/// The renamed text of one source, or `None` when no key in it is renamed.
pub fn rewrite_source(
    extractor: &dyn UsageExtractor,
    path: &Path,
    source: &str,
    renames: &RenameMap,
) -> Result<Option<String>> {
    let edits: Vec<TextEdit> = extractor
        .usages(path, source)?
        .iter()
        .filter_map(|usage| {
            let renamed = renames.get(&usage.key)?;
            usage.site.edit(source, &usage.key, renamed)
        })
        .collect();

    if edits.is_empty() {
        return Ok(None);
    }
    Ok(Some(apply_edits(source, edits)))
}

/// Files changed and files skipped by [`rewrite_files`].
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Rewrite `paths` in place. Read and parse failures are collected; write failures abort.
///
/// A file that is not valid UTF-8 is never written back, its decoded text being lossy.
pub fn rewrite_files(
    extractor: &dyn UsageExtractor,
    paths: &[PathBuf],
    renames: &RenameMap,
) -> Result<RewriteOutcome> {
    let mut outcome = RewriteOutcome::default();
    for path in paths {
        let file = match SourceFile::read(path) {
            Ok(file) => file,
            Err(e) => {
                outcome
                    .skipped
                    .push(SkippedFile::new(path, extractor.kind(), e.to_string()));
                continue;
            }
        };
        match rewrite_source(extractor, &file.path, &file.content, renames) {
            Ok(Some(_)) if file.lossy => outcome.skipped.push(SkippedFile::new(
                path,
                extractor.kind(),
                NOT_UTF8_ERROR,
            )),
            Ok(Some(content)) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write file: {}", path.display()))?;
                outcome.rewritten.push(path.clone());
            }
            Ok(None) => {}
            Err(e) => outcome.skipped.push(SkippedFile::new(
                path,
                extractor.kind(),
                e.to_string(),
            )),
        }
    }
    Ok(outcome)
}

/// Source files of one module, by dialect.
#[derive(Debug, Default, Clone)]
pub struct ModuleSources {
    pub scripts: Vec<PathBuf>,
    pub markup: Vec<PathBuf>,
}

/// Prefix every key of `report`, rewriting its sources in place.
///
/// Returns the report with renamed `used`, `missing` and `compatible` sets, and the files
/// that could not be rewritten in `skipped`.
pub fn rename_module(
    report: ModuleReport,
    prefix: &str,
    sources: &ModuleSources,
    vocabulary: &Vocabulary,
) -> Result<ModuleReport> {
    let renames = RenameMap::with_prefix(&report.used, &report.compatible, prefix);

    let scripts = rewrite_files(&ScriptExtractor::new(vocabulary), &sources.scripts, &renames)?;
    let markup = rewrite_files(&MarkupExtractor::new(vocabulary), &sources.markup, &renames)?;

    let mut skipped = report.skipped.clone();
    for file in scripts.skipped.into_iter().chain(markup.skipped) {
        if !skipped.contains(&file) {
            skipped.push(file);
        }
    }

    Ok(ModuleReport {
        used: report.used.iter().map(|key| key.with_prefix(prefix)).collect(),
        missing: report.missing.iter().map(|key| key.with_prefix(prefix)).collect(),
        compatible: renames.rename_catalog(&report.compatible),
        skipped,
        ..report
    })
}
