use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::Vocabulary;

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_translate_service")]
    pub translate_service: String,
    #[serde(default = "default_translate_method")]
    pub translate_method: String,
    #[serde(default = "default_translate_filter")]
    pub translate_filter: String,
    #[serde(default = "default_directive_attribute")]
    pub directive_attribute: String,
    #[serde(default = "default_script_extensions")]
    pub script_extensions: Vec<String>,
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_locale() -> String {
    "fr_FR".to_string()
}

fn default_translate_service() -> String {
    "$translate".to_string()
}

fn default_translate_method() -> String {
    "instant".to_string()
}

fn default_translate_filter() -> String {
    "translate".to_string()
}

fn default_directive_attribute() -> String {
    "translate".to_string()
}

fn default_script_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_markup_extensions() -> Vec<String> {
    vec!["html".to_string()]
}

fn default_catalog_dir() -> String {
    "translations".to_string()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/bower_components/**"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            translate_service: default_translate_service(),
            translate_method: default_translate_method(),
            translate_filter: default_translate_filter(),
            directive_attribute: default_directive_attribute(),
            script_extensions: default_script_extensions(),
            markup_extensions: default_markup_extensions(),
            catalog_dir: default_catalog_dir(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a name is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        let names = [
            ("locale", &self.locale),
            ("translateService", &self.translate_service),
            ("translateMethod", &self.translate_method),
            ("translateFilter", &self.translate_filter),
            ("directiveAttribute", &self.directive_attribute),
            ("catalogDir", &self.catalog_dir),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                anyhow::bail!("'{}' must not be empty", field);
            }
        }

        if self.script_extensions.is_empty() && self.markup_extensions.is_empty() {
            anyhow::bail!("'scriptExtensions' and 'markupExtensions' are both empty");
        }

        Ok(())
    }

    /// Names under which sources reference the translation API.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            service: self.translate_service.clone(),
            method: self.translate_method.clone(),
            filter: self.translate_filter.clone(),
            directive: self
                .directive_attribute
                .trim_start_matches("data-")
                .to_string(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
