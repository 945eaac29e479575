//! Global sheetcal configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{SheetCalError, SheetCalResult};
use crate::submit::FailurePolicy;

/// Global configuration at ~/.config/sheetcal/config.toml
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct GlobalConfig {
    /// Which stored Google session to use when several exist.
    pub google_account: Option<String>,

    /// Submit every valid row even after a failure.
    #[serde(default)]
    pub keep_going: bool,
}

impl GlobalConfig {
    pub fn config_dir() -> SheetCalResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| SheetCalError::Config("Could not determine config directory".into()))?
            .join("sheetcal"))
    }

    pub fn config_path() -> SheetCalResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, or defaults if it doesn't exist.
    pub fn load() -> SheetCalResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
            .map_err(|e| SheetCalError::Config(format!("{}: {}", path.display(), e)))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::AbortOnFirstFailure
        }
    }
}
