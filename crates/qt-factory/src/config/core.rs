use super::types::Config;
use super::utils::{default_bin_dir, default_config_path, default_log_path};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one the default location is tried
/// and a missing file simply yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(Config::default()),
        },
    };

    if !path.exists() {
        if required {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        return Ok(Config::default());
    }

    let text =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    parse_config(&text).with_context(|| format!("Invalid config file {:?}", path))
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

impl Config {
    pub fn bin_dir(&self) -> PathBuf {
        self.bin_dir.clone().unwrap_or_else(default_bin_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}
