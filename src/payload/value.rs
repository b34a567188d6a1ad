//! Values stored in a [`FormPayload`](super::FormPayload).

use bytes::Bytes;

/// A single form value: plain text or a named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File {
        data: Bytes,
        filename: String,
        mime_type: String,
    },
}

/// MIME type of file values added without one.
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn file(data: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self::typed_file(data, filename, DEFAULT_FILE_TYPE)
    }

    pub fn typed_file(
        data: impl Into<Bytes>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        FieldValue::File {
            data: data.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Text content, or `None` for file values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::File { .. } => None,
        }
    }

    /// File name, or `None` for text values.
    pub fn filename(&self) -> Option<&str> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::File { filename, .. } => Some(filename),
        }
    }

    /// MIME type, or `None` for text values.
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::File { mime_type, .. } => Some(mime_type),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FieldValue::File { .. })
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

/// Everything stored under one key.
///
/// `Single` is promoted to `Multiple` on the second append and is never
/// demoted, even when elements are later removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Single(FieldValue),
    Multiple(Vec<FieldValue>),
}

impl Entry {
    pub fn is_array(&self) -> bool {
        matches!(self, Entry::Multiple(_))
    }

    /// Values in push order. A single entry yields one value.
    pub fn values(&self) -> &[FieldValue] {
        match self {
            Entry::Single(value) => std::slice::from_ref(value),
            Entry::Multiple(values) => values,
        }
    }

    pub(crate) fn push(&mut self, value: FieldValue) {
        match self {
            Entry::Multiple(values) => values.push(value),
            Entry::Single(first) => {
                let first = std::mem::replace(first, FieldValue::Text(String::new()));
                *self = Entry::Multiple(vec![first, value]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_promotes_to_pair() {
        let mut entry = Entry::Single(FieldValue::text("a"));
        entry.push(FieldValue::text("b"));
        assert_eq!(
            entry,
            Entry::Multiple(vec![FieldValue::text("a"), FieldValue::text("b")])
        );
    }

    #[test]
    fn multiple_keeps_growing() {
        let mut entry = Entry::Multiple(vec![FieldValue::text("a")]);
        entry.push(FieldValue::text("b"));
        entry.push(FieldValue::text("c"));
        assert_eq!(entry.values().len(), 3);
        assert_eq!(entry.values()[2].as_text(), Some("c"));
    }

    #[test]
    fn single_values_is_one_element_slice() {
        let entry = Entry::Single(FieldValue::file(&b"xy"[..], "f.bin"));
        assert_eq!(entry.values().len(), 1);
        assert_eq!(entry.values()[0].filename(), Some("f.bin"));
        assert!(!entry.is_array());
    }
}
