//! Core data structures shared by the extraction, reconciliation and rewrite phases.
//!
//! - `usage_key`: keys recovered from usage sites and their matching rule
//! - `module`: module descriptors and per-module reports
//! - `source`: source files read into memory

pub mod module;
pub mod source;
pub mod usage_key;

use indexmap::IndexMap;

pub use module::{Module, ModuleReport, SkippedFile, SourceKind};
pub use source::SourceFile;
pub use usage_key::{KeyMatcher, KeyPart, UsageKey, WILDCARD};

/// Exact catalog key to localized text, in declaration order.
pub type Catalog = IndexMap<String, String>;
