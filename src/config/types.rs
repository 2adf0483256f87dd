//! Configuration types for the calendar service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_MONTHLY_TARGET_DAYS;
use crate::models::{Settings, decimal_number};

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Where the local snapshot lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON snapshot file.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/gongsu-calendar.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Statistics options.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsConfig {
    /// Monthly labor-day target for the progress insight.
    #[serde(default = "default_target_days", with = "decimal_number")]
    pub monthly_target_days: Decimal,
}

fn default_target_days() -> Decimal {
    DEFAULT_MONTHLY_TARGET_DAYS
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            monthly_target_days: DEFAULT_MONTHLY_TARGET_DAYS,
        }
    }
}

/// Remote mirror connection.
///
/// The key and user id are supplied as-is; obtaining them is not this
/// service's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the REST endpoint, e.g. `https://example.supabase.co`.
    pub url: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Identity the rows are stored under.
    pub user_id: String,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Snapshot location.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Settings used when no snapshot exists yet.
    #[serde(default)]
    pub defaults: Settings,
    /// Statistics options.
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Optional remote mirror.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}
