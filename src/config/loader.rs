//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file, with environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CalendarError, CalendarResult};

use super::types::AppConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "GONGSU_CONFIG";
/// Environment variable overriding `server.bind`.
pub const BIND_ENV: &str = "GONGSU_BIND";
/// Environment variable overriding `storage.path`.
pub const DATA_PATH_ENV: &str = "GONGSU_DATA";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/gongsu.yaml";

/// Loads and provides access to the service configuration.
///
/// # File Layout
///
/// ```text
/// server:
///   bind: 127.0.0.1:8080
/// storage:
///   path: data/gongsu-calendar.json
/// defaults:
///   defaultDailyRate: 150000
///   defaultHourlyRate: 18750
///   defaultWorkDays: 1.0
/// statistics:
///   monthly_target_days: 20
/// remote:            # optional
///   url: https://example.supabase.co
///   api_key: ...
///   user_id: ...
/// ```
///
/// # Example
///
/// ```no_run
/// use gongsu_calendar::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/gongsu.yaml")?;
/// println!("Listening on {}", loader.config().server.bind);
/// # Ok::<(), gongsu_calendar::error::CalendarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> CalendarResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<AppConfig>(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Loads the file named by `GONGSU_CONFIG` (or the default path) and
    /// applies the `GONGSU_BIND` / `GONGSU_DATA` overrides.
    pub fn from_env() -> CalendarResult<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut loader = Self::load(&path)?;
        loader.apply_overrides(env::var(BIND_ENV).ok(), env::var(DATA_PATH_ENV).ok());
        info!(
            path = %loader.path.display(),
            bind = %loader.config.server.bind,
            storage = %loader.config.storage.path.display(),
            remote = loader.config.remote.is_some(),
            "Loaded configuration"
        );
        Ok(loader)
    }

    /// Replaces the bind address and snapshot path when values are given.
    pub fn apply_overrides(&mut self, bind: Option<String>, data_path: Option<String>) {
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.config.server.bind = bind;
        }
        if let Some(path) = data_path.filter(|p| !p.trim().is_empty()) {
            self.config.storage.path = PathBuf::from(path);
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CalendarResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CalendarError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CalendarError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the file the configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
