//! The extraction, reconciliation and rewrite engine.
//!
//! - `data`: keys, modules, reports and source files
//! - `parsers`: script, markup, expression and catalog parsers
//! - `extract`: usage extraction from scripts and templates
//! - `catalog`, `reconcile`, `merge`: declared keys and how used keys match them
//! - `rewrite`: renaming keys in catalogs and sources
//! - `finder`, `file_scanner`: locating modules and their files
//! - `context`: the `check`, `search` and `rewrite` operations

pub mod catalog;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod finder;
pub mod interpolate;
pub mod merge;
pub mod parsers;
pub mod reconcile;
pub mod rewrite;

pub use context::Project;
