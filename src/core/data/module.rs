use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{Catalog, UsageKey};

/// An independently addressable subtree of the source project.
///
/// `exclude` holds globs (`<other module>/**/*`) for the modules nested inside this one, so
/// that two modules never scan the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub path: PathBuf,
    pub exclude: Vec<String>,
}

impl Module {
    pub fn new(path: impl Into<PathBuf>, exclude: Vec<String>) -> Self {
        Self {
            path: path.into(),
            exclude,
        }
    }

    /// The whole project treated as a single module.
    pub fn whole(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Vec::new())
    }
}

/// Which side of the file pipeline failed to handle a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Script,
    Markup,
}

/// A file skipped during extraction or rewrite because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file_path: String,
    pub kind: SourceKind,
    pub error: String,
}

impl SkippedFile {
    pub fn new(file_path: &Path, kind: SourceKind, error: impl Into<String>) -> Self {
        Self {
            file_path: file_path.to_string_lossy().to_string(),
            kind,
            error: error.into(),
        }
    }
}

/// A module together with everything derived from it during one operation.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub path: PathBuf,
    pub exclude: Vec<String>,
    /// Sorted, de-duplicated keys referenced by the module's scripts and templates.
    pub used: Vec<UsageKey>,
    /// The module's own catalog for the requested locale.
    pub declared: Catalog,
    /// Used keys with no matching catalog entry.
    pub missing: Vec<UsageKey>,
    /// Catalog entries matched by at least one used key.
    pub compatible: Catalog,
    /// Catalog file written by `rewrite`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

impl ModuleReport {
    pub fn new(module: Module) -> Self {
        Self {
            path: module.path,
            exclude: module.exclude,
            used: Vec::new(),
            declared: Catalog::new(),
            missing: Vec::new(),
            compatible: Catalog::new(),
            translation_file: None,
            skipped: Vec::new(),
        }
    }

    pub fn module(&self) -> Module {
        Module::new(self.path.clone(), self.exclude.clone())
    }
}
