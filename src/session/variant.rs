//! Upload variants composed from capabilities.
//!
//! A variant is a list of field contributors plus an optional previewer.
//! Plain uploads only contribute fields; file uploads add a name/size
//! preview; image uploads preview images inline.

use std::fmt;

use crate::payload::FormPayload;
use crate::session::contrib::ContributesFields;
use crate::session::file::PendingFile;
use crate::session::preview::{FilePreview, ImagePreview, Preview, Previewable};

pub struct UploadVariant {
    name: &'static str,
    contributors: Vec<Box<dyn ContributesFields>>,
    previewer: Option<Box<dyn Previewable>>,
}

impl UploadVariant {
    pub fn plain() -> Self {
        Self {
            name: "plain",
            contributors: Vec::new(),
            previewer: None,
        }
    }

    pub fn file() -> Self {
        Self {
            name: "file",
            contributors: Vec::new(),
            previewer: Some(Box::new(FilePreview)),
        }
    }

    pub fn image() -> Self {
        Self {
            name: "image",
            contributors: Vec::new(),
            previewer: Some(Box::new(ImagePreview)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a field source; sources run in the order they were added.
    pub fn with_contributor(mut self, contributor: impl ContributesFields + 'static) -> Self {
        self.contributors.push(Box::new(contributor));
        self
    }

    pub fn with_previewer(mut self, previewer: impl Previewable + 'static) -> Self {
        self.previewer = Some(Box::new(previewer));
        self
    }

    pub fn contribute(&self, payload: &mut FormPayload) {
        for contributor in &self.contributors {
            contributor.contribute(payload);
        }
    }

    pub fn preview(&self, file: &PendingFile) -> Option<Preview> {
        self.previewer.as_ref().map(|p| p.preview(file))
    }
}

impl Default for UploadVariant {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for UploadVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadVariant")
            .field("name", &self.name)
            .field("contributors", &self.contributors.len())
            .field("previewer", &self.previewer.is_some())
            .finish()
    }
}
