//! Preview data for pending files.
//!
//! Only the data a front end needs to show a file is produced here; drawing
//! it is somebody else's job.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::session::file::PendingFile;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// What a previewer produced for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    File { filename: String, size_label: String },
    Image { filename: String, data_url: String },
}

/// Capability: turn a pending file into preview data.
pub trait Previewable {
    fn preview(&self, file: &PendingFile) -> Preview;
}

/// Name and human-readable size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePreview;

impl Previewable for FilePreview {
    fn preview(&self, file: &PendingFile) -> Preview {
        Preview::File {
            filename: file.filename.clone(),
            size_label: format_size(file.size),
        }
    }
}

/// Inline `data:` URL of the image bytes. Non-image files fall back to a
/// file preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePreview;

impl Previewable for ImagePreview {
    fn preview(&self, file: &PendingFile) -> Preview {
        if !file.is_image() {
            return FilePreview.preview(file);
        }

        Preview::Image {
            filename: file.filename.clone(),
            data_url: format!("data:{};base64,{}", file.mime_type, STANDARD.encode(&file.data)),
        }
    }
}

/// Human-readable size with two significant digits (`1.5 KB`, `12 MB`).
///
/// Divides by 1024 while the value is above 1024, stopping at GB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let digits = if size >= 10.0 || unit == 0 {
        0
    } else {
        1
    };
    format!("{:.*} {}", digits, size, SIZE_UNITS[unit])
}
