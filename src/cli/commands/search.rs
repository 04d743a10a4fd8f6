use anyhow::Result;

use super::super::args::SearchCommand;
use super::super::exit_status::ExitStatus;
use super::helper::{finish, open_project};
use crate::core::merge::MergeOptions;

pub fn search(cmd: SearchCommand) -> Result<ExitStatus> {
    let common = &cmd.common;
    let (project, locale) = open_project(&cmd.source, common)?;

    let reports = project.search(
        &cmd.project,
        common.module,
        &locale,
        MergeOptions::from(&cmd.merge),
    )?;

    finish(&cmd.source, &reports, common)
}
