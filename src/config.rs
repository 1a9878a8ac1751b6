//! Configuration management for Stockbook

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Storage key inherited from the original register; the durable file is
/// named `<key>.json` so state written under that key remains readable.
pub const STORAGE_KEY: &str = "inventoryItems";

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub archive_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix STOCKBOOK_)
            .add_source(
                Environment::with_prefix("STOCKBOOK")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override data directory from STOCKBOOK_DATA_DIR env var if present
            .set_override_option("storage.data_dir", env::var("STOCKBOOK_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Path of the durable collection file
    pub fn store_path(&self) -> PathBuf {
        self.storage.data_dir.join(format!("{}.json", STORAGE_KEY))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            archive_name: "inventory_export.zip".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
