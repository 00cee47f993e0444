use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::checks::CheckSet;

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

fn default_checks() -> Vec<String> {
    ["accelerators", "punctuation", "place-markers", "phrase-suggestions"]
        .map(String::from)
        .to_vec()
}

fn default_accelerator_marker() -> char {
    '&'
}

fn default_skip_obsolete() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Checks to run, by name. Unknown names are rejected by `validate`.
    #[serde(default = "default_checks")]
    pub checks: Vec<String>,
    #[serde(default = "default_accelerator_marker")]
    pub accelerator_marker: char,
    /// Phrase book files loaded for batch translation and the
    /// phrase-suggestion check, in match-priority order.
    #[serde(default)]
    pub phrasebooks: Vec<String>,
    /// Glob patterns excluded when scanning directories for catalogs.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_skip_obsolete")]
    pub skip_obsolete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checks: default_checks(),
            accelerator_marker: default_accelerator_marker(),
            phrasebooks: Vec::new(),
            ignores: Vec::new(),
            skip_obsolete: default_skip_obsolete(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for unknown check names or invalid glob patterns in
    /// `ignores`.
    pub fn validate(&self) -> Result<()> {
        for check in &self.checks {
            if !default_checks().iter().any(|known| known == check) {
                anyhow::bail!(
                    "Unknown check \"{}\" in config (expected one of: {})",
                    check,
                    default_checks().join(", ")
                );
            }
        }
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        Ok(())
    }

    /// The check toggles this config enables.
    pub fn check_set(&self) -> CheckSet {
        let enabled = |name: &str| self.checks.iter().any(|check| check == name);
        CheckSet {
            accelerators: enabled("accelerators"),
            punctuation: enabled("punctuation"),
            place_markers: enabled("place-markers"),
            phrase_suggestions: enabled("phrase-suggestions"),
            accelerator_marker: self.accelerator_marker,
        }
    }

    /// Whether a path matches one of the ignore patterns.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.ignores
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .any(|pattern| pattern.matches(&path))
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
            let content = fs::read_to_string(&path)?;
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
