//! # Storefront Configuration
//!
//! Where the API lives, where the cart is stored and which language the
//! shopper reads.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`)
//! 3. Environment variables (`ROCKETSHOES_*`)
//!
//! ## Example Configuration File
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! backend = "sqlite"
//! path = "/var/lib/rocketshoes/cart.db"
//! namespace = "@RocketShoes"
//!
//! [messages]
//! locale = "pt-BR"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use rocketshoes_core::DEFAULT_STORAGE_NAMESPACE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::messages::Locale;

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Errors while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Stock and catalog API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL serving `/stock/{id}` and `/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which persistent store backs the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file, survives restarts
    #[default]
    Sqlite,

    /// Process memory, lost on exit
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, memory",
                other
            )),
        }
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Key namespace; the cart lives under `{namespace}:cart`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_STORAGE_NAMESPACE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: None,
            namespace: default_namespace(),
        }
    }
}

/// User message settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageSettings {
    #[serde(default)]
    pub locale: Locale,
}

// =============================================================================
// Root Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub messages: MessageSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// default file just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(ConfigError::Invalid(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("namespace must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ROCKETSHOES_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKETSHOES_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Invalid API timeout in environment"),
            }
        }

        if let Some(backend) = lookup("ROCKETSHOES_STORAGE") {
            match backend.parse() {
                Ok(parsed) => self.storage.backend = parsed,
                Err(e) => warn!(error = %e, "Invalid storage backend in environment"),
            }
        }

        if let Some(path) = lookup("ROCKETSHOES_DB_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(namespace) = lookup("ROCKETSHOES_NAMESPACE") {
            self.storage.namespace = namespace;
        }

        if let Some(locale) = lookup("ROCKETSHOES_LOCALE") {
            match locale.parse() {
                Ok(parsed) => self.messages.locale = parsed,
                Err(e) => warn!(error = %e, "Invalid locale in environment"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "rocketshoes", "storefront")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// SQLite file for the cart: the configured path, else the platform
    /// data directory, else the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.path {
            return path.clone();
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("cart.db"))
            .unwrap_or_else(|| PathBuf::from("rocketshoes-cart.db"))
    }
}
