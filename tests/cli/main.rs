use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod init;
mod rewrite;
mod search;

const BIN_NAME: &str = "lingo";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let test = Self::new()?;
        for (path, content) in files {
            test.write_file(path, content)?;
        }
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self, source: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("check").arg(source);
        cmd
    }

    pub fn search_command(&self, source: &str, project: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("search").arg(source).arg(project);
        cmd
    }

    pub fn rewrite_command(&self, source: &str, project: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("rewrite").arg(source).arg(project);
        cmd
    }

    /// Snapshot settings replacing the project directory with `[ROOT]`.
    pub fn settings(&self) -> insta::Settings {
        let mut settings = insta::Settings::clone_current();
        settings.add_filter(
            &regex::escape(&self.project_dir.to_string_lossy()),
            "[ROOT]",
        );
        settings
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Template, controller and catalog of a single-module AngularJS app.
pub const HOME_TEMPLATE: &str = r#"<p data-translate="hello_world"></p>
<a>{{ 'link' | translate }}</a>
<a>{{ ('link_' + ctrl.x) | translate }}</a>
"#;

pub const HOME_CONTROLLER: &str = r#"export default class HomeController {
    constructor($translate) {
        this.$translate = $translate;
    }

    title() {
        return this.$translate.instant('home_title');
    }
}
"#;

pub const HOME_CATALOG: &str = r#"{
  "hello_world": "Bonjour",
  "link_help": "Aide",
  "unused": "Inutile"
}
"#;
