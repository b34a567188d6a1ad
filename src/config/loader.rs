use std::fs;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use thiserror::Error;

use crate::config::types::Config;

const KNOWN_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

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

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/dnd-uploads/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("dnd-uploads").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The file field name is not empty
    /// - The upload URL, when set, is http(s)
    /// - The HTTP method is one that carries a body
    /// - Extra headers are well-formed and leave `Content-Type` alone
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.field_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "upload.field_name must not be empty".to_string(),
            });
        }

        let url = &self.upload.url;
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("upload.url '{}' must start with http:// or https://", url),
            });
        }

        let method = self.transport.method.to_ascii_uppercase();
        if !KNOWN_METHODS.contains(&method.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "transport.method '{}' is not one of {}",
                    self.transport.method,
                    KNOWN_METHODS.join(", ")
                ),
            });
        }

        for (name, value) in &self.transport.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("transport.headers: '{}' is not a valid header name", name),
                });
            }
            if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: "transport.headers must not set Content-Type; the multipart body sets it"
                        .to_string(),
                });
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("transport.headers: value of '{}' is not a valid header value", name),
                });
            }
        }

        Ok(())
    }
}
