use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, init::init, rewrite::rewrite, search::search},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(ExitStatus)` once the command has printed its output
/// - `Err` on a fatal error (bad path, unreadable file, invalid catalog or config)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Search(cmd)) => search(cmd),
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
