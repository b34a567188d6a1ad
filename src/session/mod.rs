//! Upload sessions and everything they are composed of.
//!
//! ```text
//! surfaces ──add_files──→ UploadSession ──begin_send──→ FormPayload ──render──→ Transport
//!                              ↑                                                   │
//!                              └──────────────── finish_send ←─────────────────────┘
//! ```

mod contrib;
mod display;
mod error;
mod file;
mod intent;
mod preview;
mod reducer;
mod state;
mod upload;
mod validation;
mod variant;

pub use contrib::{ContributesFields, FormFields, FormInput, PageState, TriggeringElement};
pub use display::{ErrorDisplay, ErrorMessages};
pub use error::SessionError;
pub use file::{guess_mime_type, PendingFile};
pub use intent::SessionIntent;
pub use preview::{format_size, FilePreview, ImagePreview, Preview, Previewable};
pub use reducer::UploadReducer;
pub use state::UploadState;
pub use upload::{CollectOutcome, DropOutcome, PreparedRequest, SendStep, UploadSession};
pub use validation::{FileLimits, ValidationError};
pub use variant::UploadVariant;
