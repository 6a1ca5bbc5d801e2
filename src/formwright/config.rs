use crate::error::{FormError, Result};
use crate::settings::ConfirmationSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "FORMWRIGHT_HOME";

/// User defaults, stored in `<config dir>/config.json`.
///
/// Only the settings a new session starts with live here. Forms themselves
/// are never saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormwrightConfig {
    #[serde(default)]
    pub defaults: ConfirmationSettings,
}

impl FormwrightConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FormwrightConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}

/// Where `config.json` lives: the explicit directory, else `$FORMWRIGHT_HOME`,
/// else the platform config directory.
pub fn config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "formwright", "formwright")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FormError::Settings("Could not determine config dir".to_string()))
}
