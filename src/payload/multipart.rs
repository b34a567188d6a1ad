//! Rendered multipart bodies: the ordered parts a transport puts on the wire.

use bytes::Bytes;

/// Receiver of rendered parts.
///
/// This is the `append(name, value, filename?)` contract of a form-data
/// builder, split by part type.
pub trait MultipartSink {
    fn append_text(&mut self, name: &str, value: &str);
    fn append_file(&mut self, name: &str, data: &Bytes, filename: &str, mime_type: &str);
}

/// One part of a rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        mime_type: String,
        data: Bytes,
    },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Ordered parts ready for a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<Part>,
}

impl MultipartSink for MultipartBody {
    fn append_text(&mut self, name: &str, value: &str) {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn append_file(&mut self, name: &str, data: &Bytes, filename: &str, mime_type: &str) {
        self.parts.push(Part::File {
            name: name.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            data: data.clone(),
        });
    }
}

impl MultipartBody {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total bytes of text values and file contents.
    pub fn content_len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Text { value, .. } => value.len(),
                Part::File { data, .. } => data.len(),
            })
            .sum()
    }
}

impl IntoIterator for MultipartBody {
    type Item = Part;
    type IntoIter = std::vec::IntoIter<Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}
