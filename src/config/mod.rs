//! Configuration loading for upload sessions.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LimitsConfig, TransportConfig, UploadConfig, UploadMode};
