//! Human-readable error output.

use std::collections::BTreeMap;
use std::fmt;

use crate::session::validation::ValidationError;

const FALLBACK_TEMPLATE: &str = "An unrecognized error occurred.";

/// Message templates keyed by error kind.
///
/// Templates reference error arguments by name (`@name`, `@size`, ...).
/// Kinds without a template use the `unknown` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    templates: BTreeMap<String, String>,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        let templates = [
            (
                ValidationError::CARDINALITY_EXCEEDED,
                "File @name was not added: no more than @count files may be uploaded.",
            ),
            (
                ValidationError::SIZE_EXCEEDED,
                "File @name is @size, which exceeds the maximum upload size of @max.",
            ),
            (
                ValidationError::TYPE_NOT_ALLOWED,
                "File @name was not added: only files with the following types are allowed: @types.",
            ),
            (
                ValidationError::TRANSPORT_FAILED,
                "The upload failed: @message",
            ),
            (ValidationError::UNKNOWN, FALLBACK_TEMPLATE),
        ];

        Self {
            templates: templates
                .into_iter()
                .map(|(kind, template)| (kind.to_string(), template.to_string()))
                .collect(),
        }
    }
}

impl ErrorMessages {
    /// Built-in templates overridden by `overrides`.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut messages = Self::default();
        for (kind, template) in overrides {
            messages.templates.insert(kind.clone(), template.clone());
        }
        messages
    }

    pub fn translate(&self, error: &ValidationError) -> String {
        let template = self
            .templates
            .get(&error.kind)
            .or_else(|| self.templates.get(ValidationError::UNKNOWN))
            .map(String::as_str)
            .unwrap_or(FALLBACK_TEMPLATE);

        substitute(template, &error.args)
    }
}

/// Replace each `@ident` token of `template` with its argument, in one
/// left-to-right pass. Argument values are copied verbatim; tokens without
/// an argument are kept as written.
fn substitute(template: &str, args: &BTreeMap<String, String>) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(at) = rest.find('@') {
        message.push_str(&rest[..at]);
        let token = &rest[at..];
        let ident_len = token[1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(token.len() - 1);
        let (placeholder, tail) = token.split_at(1 + ident_len);

        match args.get(placeholder) {
            Some(value) => message.push_str(value),
            None => message.push_str(placeholder),
        }
        rest = tail;
    }

    message.push_str(rest);
    message
}

/// The error list currently shown to the user.
///
/// Every render replaces the previous output.
#[derive(Debug, Clone, Default)]
pub struct ErrorDisplay {
    messages: ErrorMessages,
    lines: Vec<String>,
}

impl ErrorDisplay {
    pub fn new(messages: ErrorMessages) -> Self {
        Self {
            messages,
            lines: Vec::new(),
        }
    }

    pub fn render(&mut self, errors: &[ValidationError]) {
        self.clear();
        self.lines = errors.iter().map(|e| self.messages.translate(e)).collect();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ErrorDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
