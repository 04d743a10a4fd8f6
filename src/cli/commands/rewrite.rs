use anyhow::Result;

use super::super::args::RewriteCommand;
use super::super::exit_status::ExitStatus;
use super::helper::{finish, open_project};
use crate::core::merge::MergeOptions;

pub fn rewrite(cmd: RewriteCommand) -> Result<ExitStatus> {
    let common = &cmd.common;
    let (project, locale) = open_project(&cmd.source, common)?;

    let reports = project.rewrite(
        &cmd.project,
        common.module,
        &locale,
        MergeOptions::from(&cmd.merge),
        &cmd.prefix,
    )?;

    finish(&cmd.source, &reports, common)
}
