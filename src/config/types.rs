use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    /// Error message templates keyed by validation error kind.
    /// Missing kinds fall back to the built-in templates.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

/// When collected files are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Send as soon as files are added.
    Auto,
    /// Wait for an explicit send trigger.
    #[default]
    Manual,
}

/// Where and how files are uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Endpoint receiving the multipart body.
    #[serde(default)]
    pub url: String,
    /// Name of the file field; parts are sent as `files[<field_name>]`.
    #[serde(default = "default_field_name")]
    pub field_name: String,
    #[serde(default)]
    pub mode: UploadMode,
    /// Name of the control that triggers the upload on the server side.
    #[serde(default)]
    pub triggering_name: Option<String>,
    #[serde(default)]
    pub triggering_value: Option<String>,
}

/// Limits enforced while collecting files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of files held at once; `-1` means unlimited.
    #[serde(default = "default_cardinality")]
    pub cardinality: i64,
    /// Maximum file size in bytes; `0` means unlimited.
    #[serde(default)]
    pub max_file_size: u64,
    /// Accepted extensions (`png`, `.jpg`) or MIME types (`image/png`,
    /// `image/*`). Empty accepts everything.
    #[serde(default)]
    pub accepted_types: Vec<String>,
}

/// Request settings handed to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// HTTP method (default: POST).
    #[serde(default = "default_method")]
    pub method: String,
    /// Extra request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_field_name() -> String {
    "files".to_string()
}

fn default_cardinality() -> i64 {
    -1
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_method() -> String {
    "POST".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            field_name: default_field_name(),
            mode: UploadMode::default(),
            triggering_name: None,
            triggering_value: None,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            cardinality: default_cardinality(),
            max_file_size: 0,
            accepted_types: Vec::new(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            method: default_method(),
            headers: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.upload.field_name, "files");
        assert_eq!(config.upload.mode, UploadMode::Manual);
        assert_eq!(config.limits.cardinality, -1);
        assert_eq!(config.transport.method, "POST");
        assert!(config.messages.is_empty());
    }

    #[test]
    fn mode_is_lowercase() {
        let config: Config = toml::from_str("[upload]\nmode = \"auto\"\n").unwrap();
        assert_eq!(config.upload.mode, UploadMode::Auto);
    }
}
