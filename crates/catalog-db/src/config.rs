//! # Catalog Configuration
//!
//! Where the catalog database lives and which URL slugs are brands.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_DB_PATH=/srv/catalog.db                                 │
//! │     STOREFRONT_DB_MAX_CONNECTIONS=8                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront-catalog/catalog.toml (Linux)                  │
//! │     ~/Library/Application Support/com.storefront.catalog/catalog.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./catalog.db, 5 connections, the seven built-in brands             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [database]
//! path = "/srv/storefront/catalog.db"
//! max_connections = 8
//!
//! [[brands]]
//! slug = "nike"
//! id = 1
//! name = "Nike"
//!
//! [[brands]]
//! slug = "onitsuka"
//! id = 8
//! ```
//!
//! Listing `[[brands]]` replaces the built-in directory entirely.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use catalog_core::brand::default_brand_entries;
use catalog_core::{BrandDirectory, BrandEntry};

use crate::error::{ConfigError, ConfigResult};
use crate::pool::DbConfig;

const ENV_DB_PATH: &str = "STOREFRONT_DB_PATH";
const ENV_DB_MAX_CONNECTIONS: &str = "STOREFRONT_DB_MAX_CONNECTIONS";

// =============================================================================
// Database Settings
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("catalog.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Brand slug directory.
    #[serde(default = "default_brand_entries")]
    pub brands: Vec<BrandEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            database: DatabaseSettings::default(),
            brands: default_brand_entries(),
        }
    }
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a `catalog.toml` document. No env overrides, no validation.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        self.brand_directory()?;
        Ok(())
    }

    /// Builds the brand directory from the configured entries.
    pub fn brand_directory(&self) -> ConfigResult<BrandDirectory> {
        Ok(BrandDirectory::from_entries(&self.brands)?)
    }

    /// Pool configuration for [`Database::new`](crate::pool::Database::new).
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database.path.clone()).max_connections(self.database.max_connections)
    }

    /// Applies overrides from `lookup` (the process environment in `load`).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup(ENV_DB_MAX_CONNECTIONS) {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring non-numeric {}", ENV_DB_MAX_CONNECTIONS),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "catalog")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.database.path, PathBuf::from("catalog.db"));
        assert_eq!(config.database.max_connections, 5);

        let brands = config.brand_directory().unwrap();
        assert_eq!(brands.len(), 7);
        assert_eq!(brands.resolve("newbalance"), Some(6));
    }

    #[test]
    fn test_parse_full_file() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [database]
            path = "/srv/catalog.db"
            max_connections = 8

            [[brands]]
            slug = "nike"
            id = 1
            name = "Nike"

            [[brands]]
            slug = "onitsuka"
            id = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/srv/catalog.db"));
        assert_eq!(config.db_config().max_connections, 8);

        let brands = config.brand_directory().unwrap();
        assert_eq!(brands.len(), 2);
        assert_eq!(brands.resolve("onitsuka"), Some(8));
        assert_eq!(brands.resolve("adidas"), None);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());

        let config = CatalogConfig::from_toml_str("[database]\nmax_connections = 2\n").unwrap();
        assert_eq!(config.database.path, PathBuf::from("catalog.db"));
        assert_eq!(config.brands.len(), 7);
    }

    #[test]
    fn test_invalid_toml() {
        let err = CatalogConfig::from_toml_str("[database\npath = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CatalogConfig::default();
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CatalogConfig::default();
        config.brands.push(BrandEntry::new("NIKE", 9));
        assert!(matches!(config.validate(), Err(ConfigError::Brands(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(ENV_DB_PATH, "/tmp/other.db"), (ENV_DB_MAX_CONNECTIONS, "3")]
            .into_iter()
            .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn test_non_numeric_override_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| (key == ENV_DB_MAX_CONNECTIONS).then(|| "many".to_string()));

        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = CatalogConfig::load_or_default(Some(PathBuf::from("/nonexistent/catalog.toml")));
        assert_eq!(config.brands.len(), 7);
    }
}
