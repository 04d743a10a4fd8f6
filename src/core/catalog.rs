//! Loading the declared catalog of a module for one locale.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::data::Catalog;
use crate::core::file_scanner::scan_files;
use crate::core::parsers::{json::parse_json_file, xml::parse_xml_file};

const CATALOG_FILE_STEM: &str = "Messages_";

/// File name of the JSON catalog for `locale` (`Messages_fr_FR.json`).
pub fn catalog_file_name(locale: &str) -> String {
    format!("{}{}.json", CATALOG_FILE_STEM, locale)
}

fn is_catalog_file(path: &Path, locale: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let stem = format!("{}{}", CATALOG_FILE_STEM, locale);
    name == format!("{}.json", stem) || name == format!("{}.xml", stem)
}

/// Every catalog file for `locale` under `root`, in path order.
pub fn find_catalog_files(root: &Path, exclude: &[String], locale: &str) -> Vec<PathBuf> {
    scan_files(root, exclude, false, |path| is_catalog_file(path, locale)).files
}

/// Load and merge the catalogs for `locale` under `root`.
///
/// Files are merged in path order; a key declared again in a later file takes its value
/// from that file. An unreadable or malformed catalog is an error.
pub fn load_catalog(root: &Path, exclude: &[String], locale: &str) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for path in find_catalog_files(root, exclude, locale) {
        let part = match path.extension().and_then(|e| e.to_str()) {
            Some("xml") => parse_xml_file(&path)?,
            _ => parse_json_file(&path)?,
        };
        catalog.extend(part);
    }
    Ok(catalog)
}
