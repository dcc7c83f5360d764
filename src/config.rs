//! Configuration loading
//!
//! Reads `config.toml` from the user's config directory or an explicit path.
//! Configuration problems never stop the program: a missing file gives the
//! defaults, and an unreadable or invalid file gives the defaults plus a
//! warning for the status line.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

mod types;

pub use types::{BindingsConfig, Config, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, SuggestConfig};

use crate::error::MedfillError;

const CONFIG_DIR: &str = "medfill";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration and an optional warning to show the user
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load from `path`, or from the default location when `None`
pub fn load_config(path: Option<&Path>) -> ConfigResult {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => return ConfigResult::default(),
        },
    };

    match read_config(&path) {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", path.display());
            ConfigResult {
                config,
                warning: None,
            }
        }
        Ok(None) => ConfigResult::default(),
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{} (using defaults)", e)),
            }
        }
    }
}

/// `Ok(None)` when the file does not exist
fn read_config(path: &Path) -> Result<Option<Config>, MedfillError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let config = parse_config(&contents)?;
    Ok(Some(config))
}

pub fn parse_config(contents: &str) -> Result<Config, MedfillError> {
    let config: Config =
        toml::from_str(contents).map_err(|e| MedfillError::Config(e.message().to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), MedfillError> {
    let suggest = &config.suggest;
    if suggest.min_query_len == 0 {
        return Err(MedfillError::Config("min_query_len must be at least 1".into()));
    }
    if suggest.max_results == 0 {
        return Err(MedfillError::Config("max_results must be at least 1".into()));
    }
    if suggest.max_visible == 0 {
        return Err(MedfillError::Config("max_visible must be at least 1".into()));
    }
    if suggest.timeout_ms == 0 {
        return Err(MedfillError::Config("timeout_ms must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
