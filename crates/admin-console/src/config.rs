//! # Console Configuration
//!
//! Loaded from `admin-console.toml` in the working directory. Every key is optional; a
//! missing file means [`ConsoleConfig::default()`].
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_seconds = 10
//!
//! [upload]
//! bind_addr = "127.0.0.1:3000"
//! server_url = "http://localhost:3000"
//! dir = "uploads"
//! field_name = "avatar"
//! naming = "random"   # or "timestamp"
//! ```

use crate::upload::NamingPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Where the remote collections live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host + port of the collection endpoints (`/users`, `/products`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Upload backend settings, shared by the server and the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Address the upload backend listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Base URL the upload client posts to.
    #[serde(default = "default_base_url")]
    pub server_url: String,
    /// Directory uploaded files are written to, created on first upload.
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Multipart field carrying the file.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    #[serde(default)]
    pub naming: NamingPolicy,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_field_name() -> String {
    "avatar".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            server_url: default_base_url(),
            dir: default_upload_dir(),
            field_name: default_field_name(),
            naming: NamingPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ConsoleConfig {
    /// Default config file, relative to the working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("admin-console.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `ConsoleConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ConsoleConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks URLs, the bind address, the timeout and the upload field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("api.base_url", &self.api.base_url),
            ("upload.server_url", &self.upload.server_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be an http(s) URL, got '{}'", key, url),
                });
            }
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.upload.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid upload.bind_addr '{}'", self.upload.bind_addr),
            });
        }

        if self.upload.field_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "upload.field_name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
