//! Lingo - translation key auditor for AngularJS projects
//!
//! Lingo extracts the translation keys used by AngularJS scripts and templates, matches them
//! against locale catalogs, completes catalogs from another project and renames keys in
//! catalogs and sources at once.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, reconciliation and rewrite engine

pub mod cli;
pub mod config;
pub mod core;
