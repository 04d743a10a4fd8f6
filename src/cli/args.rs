//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check` (`c`): report used, missing and compatible keys of a project
//! - `search` (`s`): complete missing keys from another project's catalog
//! - `rewrite` (`r`): write completed catalogs and optionally prefix every key
//! - `init`: write a default `.lingorc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::merge::{MergeOptions, MergePrecedence};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// One table row per module
    #[default]
    Summary,
    /// Keys of every module
    Text,
    /// Module reports as a JSON array
    Json,
    /// No output
    Silent,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Locale code (overrides config file)
    #[arg(long)]
    pub locale: Option<String>,

    /// Split the project by AngularJS module
    #[arg(long)]
    pub module: bool,

    /// Output mode
    #[arg(short, long, value_enum, default_value_t = OutputMode::Summary)]
    pub output: OutputMode,

    /// Exit with status 1 when a module has missing keys
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Keep unused translations from source
    #[arg(short, long)]
    pub all: bool,

    /// Prefer project translations
    #[arg(short, long)]
    pub merge: bool,
}

impl From<&MergeArgs> for MergeOptions {
    fn from(args: &MergeArgs) -> Self {
        Self {
            precedence: if args.merge {
                MergePrecedence::ExternalWins
            } else {
                MergePrecedence::ModuleWins
            },
            include_all: args.all,
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Source project directory
    pub source: PathBuf,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Source project directory
    pub source: PathBuf,
    /// Project whose catalogs complete the source
    pub project: PathBuf,
    #[command(flatten)]
    pub merge: MergeArgs,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    /// Source project directory
    pub source: PathBuf,
    /// Project whose catalogs complete the source
    pub project: PathBuf,
    #[command(flatten)]
    pub merge: MergeArgs,
    /// Prefix every translation key (`_` is appended when missing)
    #[arg(short, long, default_value = "")]
    pub prefix: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check if translations are present in an AngularJS project
    #[command(visible_alias = "c")]
    Check(CheckCommand),
    /// Search missing translations in another project
    #[command(visible_alias = "s")]
    Search(SearchCommand),
    /// Write completed catalogs, renaming keys with an optional prefix
    #[command(visible_alias = "r")]
    Rewrite(RewriteCommand),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
