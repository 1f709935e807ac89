use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_SERVER_PORT, DEFAULT_TEMPLATES_PATH,
    ENV_BASE_URL, ENV_PORT, PROJECT_CATALOG_KEY,
};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub lookup_key: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            lookup_key: PROJECT_CATALOG_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub templates_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            templates_path: DEFAULT_TEMPLATES_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the config file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Like `load`, but a missing file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply `KANBAN_CATALOG_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            self.remote.base_url = url;
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|e| CatalogError::Config(format!("Invalid {}='{}': {}", ENV_PORT, port, e)))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.remote.base_url.trim().is_empty() {
            return Err(CatalogError::Config("remote.base_url must not be empty".to_string()));
        }
        if self.remote.lookup_key.trim().is_empty() {
            return Err(CatalogError::Config("remote.lookup_key must not be empty".to_string()));
        }
        if self.remote.timeout_ms == 0 {
            warn!("remote.timeout_ms is 0; remote templates will never be merged");
        }
        Ok(())
    }
}
