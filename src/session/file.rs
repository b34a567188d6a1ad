//! Files waiting to be sent.

use bytes::Bytes;

use crate::payload::FieldValue;

/// A file handed over by a surface (drop gesture or picker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub data: Bytes,
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
}

impl PendingFile {
    /// Build a file record; the size is taken from `data`.
    pub fn new(
        data: impl Into<Bytes>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        let data = data.into();
        Self {
            size: data.len() as u64,
            data,
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Like [`PendingFile::new`], guessing the MIME type from the extension.
    pub fn with_guessed_type(data: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let mime_type = guess_mime_type(&filename);
        Self::new(data, filename, mime_type)
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl From<PendingFile> for FieldValue {
    fn from(file: PendingFile) -> Self {
        FieldValue::typed_file(file.data, file.filename, file.mime_type)
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// MIME type for common upload extensions, `application/octet-stream`
/// otherwise.
pub fn guess_mime_type(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_comes_from_data() {
        let file = PendingFile::new(vec![0u8; 42], "a.bin", "application/octet-stream");
        assert_eq!(file.size, 42);
    }

    #[test]
    fn extension_is_lowercased() {
        let file = PendingFile::with_guessed_type(Vec::new(), "Photo.JPG");
        assert_eq!(file.extension().as_deref(), Some("jpg"));
        assert_eq!(file.mime_type, "image/jpeg");
        assert!(file.is_image());
    }

    #[test]
    fn file_value_keeps_mime_type() {
        let value = FieldValue::from(PendingFile::with_guessed_type(&b"x"[..], "dot.png"));
        assert_eq!(value.filename(), Some("dot.png"));
        assert_eq!(value.mime_type(), Some("image/png"));
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(extension_of(".bashrc"), None);
        assert_eq!(extension_of("README"), None);
        assert_eq!(guess_mime_type("archive.tar.zip"), "application/zip");
    }
}
