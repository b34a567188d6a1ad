use thiserror::Error;

use crate::session::state::UploadState;

/// Errors returned by session operations that cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A transport call is already in flight
    #[error("A send is already in progress")]
    SendInProgress,

    /// Send requested with no files and no pending errors
    #[error("Nothing to send")]
    NothingToSend,

    /// Operation not valid in the current state
    #[error("Expected state '{expected}', session is '{actual}'")]
    InvalidState {
        expected: UploadState,
        actual: UploadState,
    },
}
