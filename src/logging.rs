//! Tracing setup for the CLI.
//!
//! Nothing is logged unless `DND_UPLOADS_LOG` is set. `-` or `stderr` logs to
//! standard error; any other value is a file path, made unique per run as
//! `{path}.{timestamp}.{pid}`. `RUST_LOG` picks the level (default `info`).

use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log destination.
pub const LOG_ENV_VAR: &str = "DND_UPLOADS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where log events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_ENV_VAR).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => LogTarget::Disabled,
            Some("-") | Some("stderr") => LogTarget::Stderr,
            Some(path) => LogTarget::File(unique_log_path(path)),
        }
    }
}

/// Initialize tracing from `DND_UPLOADS_LOG`.
pub fn init_tracing() {
    init_tracing_to(LogTarget::from_env());
}

pub fn init_tracing_to(target: LogTarget) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
        }
        LogTarget::File(path) => {
            let Ok(file) = std::fs::File::create(&path) else {
                eprintln!("Warning: Failed to create log file: {}", path.display());
                return;
            };

            let file_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();
        }
    }
}

fn unique_log_path(base: &str) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", base, timestamp, pid))
}
