use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;

use super::super::args::{CommonArgs, OutputMode};
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::config::{CONFIG_FILE_NAME, load_config};
use crate::core::Project;
use crate::core::data::ModuleReport;

/// Open the source project with its configuration. CLI arguments override the config file.
pub fn open_project(source: &Path, common: &CommonArgs) -> Result<(Project, String)> {
    if !source.is_dir() {
        bail!("Source path is not a directory: {}", source.display());
    }

    let config_result = load_config(source)?;
    if common.verbose && !config_result.from_file {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".bold().cyan(),
            CONFIG_FILE_NAME
        );
    }

    let config = config_result.config;
    let locale = common
        .locale
        .clone()
        .unwrap_or_else(|| config.locale.clone());
    let project = Project::new(source, config, common.verbose)?;
    Ok((project, locale))
}

/// Print the reports and pick the exit status.
pub fn finish(source: &Path, reports: &[ModuleReport], common: &CommonArgs) -> Result<ExitStatus> {
    report::print(source, reports, common.output)?;
    if common.output != OutputMode::Silent {
        report::print_skipped(reports, common.verbose);
    }

    if common.strict && reports.iter().any(|r| !r.missing.is_empty()) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
