//! Function configuration loading.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Environment variable pointing at the function's configuration file.
pub const CONFIG_PATH_ENV: &str = "CS_FN_CONFIG_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse error in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Source of the configuration value handed to handlers.
pub trait ConfigLoader {
    type Config;

    fn load(&self) -> Result<Self::Config, ConfigError>;
}

/// Loads configuration from a file on the local filesystem.
///
/// Files ending in `.toml` are parsed as TOML, anything else as JSON. Without
/// a path no configuration is loaded and `load` returns `Ok(None)`.
#[derive(Debug, Clone)]
pub struct FileSystemConfigLoader<T> {
    path: Option<PathBuf>,
    _config: PhantomData<fn() -> T>,
}

impl<T> FileSystemConfigLoader<T> {
    /// Use the path in `CS_FN_CONFIG_PATH`, if set.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
            _config: PhantomData,
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            _config: PhantomData,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<T: DeserializeOwned> ConfigLoader for FileSystemConfigLoader<T> {
    type Config = Option<T>;

    fn load(&self) -> Result<Option<T>, ConfigError> {
        let Some(path) = &self.path else {
            tracing::debug!("No configuration path provided");
            return Ok(None);
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path.clone()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?
        } else {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.clone(),
                source,
            })?
        };

        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(Some(config))
    }
}

/// Returns a fixed configuration value.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader<C>(pub C);

impl<C: Clone> ConfigLoader for StaticConfigLoader<C> {
    type Config = C;

    fn load(&self) -> Result<C, ConfigError> {
        Ok(self.0.clone())
    }
}
