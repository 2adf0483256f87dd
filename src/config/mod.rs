//! Configuration loading for the calendar service.
//!
//! This module loads the service configuration (listen address, snapshot
//! location, default rates, statistics target and the optional remote
//! mirror) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use gongsu_calendar::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/gongsu.yaml").unwrap();
//! println!("Snapshot at {}", config.config().storage.path.display());
//! ```

mod loader;
mod types;

pub use loader::{
    BIND_ENV, CONFIG_PATH_ENV, ConfigLoader, DATA_PATH_ENV, DEFAULT_CONFIG_PATH,
};
pub use types::{AppConfig, RemoteConfig, ServerConfig, StatisticsConfig, StorageConfig};
