use anyhow::Result;

use super::super::args::CheckCommand;
use super::super::exit_status::ExitStatus;
use super::helper::{finish, open_project};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let common = &cmd.common;
    let (project, locale) = open_project(&cmd.source, common)?;

    let reports = project.check(common.module, &locale)?;

    finish(&cmd.source, &reports, common)
}
