//! File checks run while collecting, and the errors they produce.

use std::collections::BTreeMap;

use crate::config::LimitsConfig;
use crate::session::file::PendingFile;
use crate::session::preview::format_size;

/// A collection or send problem, rendered later through a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: String,
    pub args: BTreeMap<String, String>,
}

impl ValidationError {
    pub const CARDINALITY_EXCEEDED: &'static str = "cardinality_exceeded";
    pub const SIZE_EXCEEDED: &'static str = "size_exceeded";
    pub const TYPE_NOT_ALLOWED: &'static str = "type_not_allowed";
    pub const TRANSPORT_FAILED: &'static str = "transport_failed";
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// Limits a session enforces on incoming files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLimits {
    /// Maximum number of files held at once.
    pub cardinality: Option<usize>,
    /// Maximum size of one file in bytes.
    pub max_file_size: Option<u64>,
    /// Accepted extensions or MIME types; empty accepts everything.
    pub accepted_types: Vec<String>,
}

impl From<&LimitsConfig> for FileLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            cardinality: usize::try_from(config.cardinality).ok(),
            max_file_size: (config.max_file_size > 0).then_some(config.max_file_size),
            accepted_types: config
                .accepted_types
                .iter()
                .map(|t| t.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl FileLimits {
    /// Whether `held` files already fill the session.
    pub fn is_full(&self, held: usize) -> bool {
        self.cardinality.is_some_and(|max| held >= max)
    }

    /// Check one file, given how many the session already holds.
    ///
    /// Cardinality is checked first, then size, then type.
    pub fn check(&self, file: &PendingFile, held: usize) -> Result<(), ValidationError> {
        if let Some(max) = self.cardinality {
            if held >= max {
                return Err(ValidationError::new(ValidationError::CARDINALITY_EXCEEDED)
                    .with_arg("@count", max.to_string())
                    .with_arg("@name", file.filename.clone()));
            }
        }

        if let Some(max) = self.max_file_size {
            if file.size > max {
                return Err(ValidationError::new(ValidationError::SIZE_EXCEEDED)
                    .with_arg("@name", file.filename.clone())
                    .with_arg("@size", format_size(file.size))
                    .with_arg("@max", format_size(max)));
            }
        }

        if !self.accepts_type(file) {
            return Err(ValidationError::new(ValidationError::TYPE_NOT_ALLOWED)
                .with_arg("@name", file.filename.clone())
                .with_arg("@types", self.accepted_types.join(", ")));
        }

        Ok(())
    }

    fn accepts_type(&self, file: &PendingFile) -> bool {
        if self.accepted_types.is_empty() {
            return true;
        }

        let extension = file.extension();
        let mime = file.mime_type.to_ascii_lowercase();
        self.accepted_types.iter().any(|accepted| {
            if let Some(prefix) = accepted.strip_suffix("/*") {
                mime.split('/').next() == Some(prefix)
            } else if accepted.contains('/') {
                *accepted == mime
            } else {
                extension.as_deref() == Some(accepted.as_str())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(cardinality: i64, max_file_size: u64, types: &[&str]) -> FileLimits {
        FileLimits::from(&LimitsConfig {
            cardinality,
            max_file_size,
            accepted_types: types.iter().map(|t| t.to_string()).collect(),
        })
    }

    fn file(name: &str, size: usize) -> PendingFile {
        PendingFile::with_guessed_type(vec![0u8; size], name)
    }

    #[test]
    fn unlimited_config_accepts_anything() {
        let limits = limits(-1, 0, &[]);
        assert_eq!(limits, FileLimits::default());
        assert!(limits.check(&file("a.exe", 10_000), 1_000).is_ok());
        assert!(!limits.is_full(1_000));
    }

    #[test]
    fn size_exceeded_carries_arguments() {
        let err = limits(-1, 10, &[]).check(&file("big.png", 11), 0).unwrap_err();
        assert_eq!(err.kind, ValidationError::SIZE_EXCEEDED);
        assert_eq!(err.args["@name"], "big.png");
        assert_eq!(err.args["@size"], "11 B");
        assert_eq!(err.args["@max"], "10 B");
    }

    #[test]
    fn cardinality_is_checked_first() {
        let limits = limits(1, 10, &["png"]);
        let err = limits.check(&file("big.gif", 100), 1).unwrap_err();
        assert_eq!(err.kind, ValidationError::CARDINALITY_EXCEEDED);
        assert!(limits.is_full(1));
        assert!(!limits.is_full(0));
    }

    #[test]
    fn types_match_extension_or_mime() {
        let limits = limits(-1, 0, &[".PNG", "application/pdf", "text/*"]);
        assert!(limits.check(&file("a.png", 1), 0).is_ok());
        assert!(limits.check(&file("a.pdf", 1), 0).is_ok());
        assert!(limits.check(&file("a.csv", 1), 0).is_ok());

        let err = limits.check(&file("a.gif", 1), 0).unwrap_err();
        assert_eq!(err.kind, ValidationError::TYPE_NOT_ALLOWED);
        assert_eq!(err.args["@types"], "png, application/pdf, text/*");
    }
}
