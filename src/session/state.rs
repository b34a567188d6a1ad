//! Lifecycle state of an upload session.

use std::fmt;

use crate::mvi::MachineState;

/// Where a session is in its send cycle.
///
/// `CompletedSuccess` and `CompletedError` are transient: the session
/// passes through them while finalizing and settles back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    CollectingFiles,
    Sending,
    CompletedSuccess,
    CompletedError,
}

impl MachineState for UploadState {}

impl UploadState {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CompletedSuccess | Self::CompletedError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectingFiles => "collecting_files",
            Self::Sending => "sending",
            Self::CompletedSuccess => "completed_success",
            Self::CompletedError => "completed_error",
        }
    }
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_default() {
        assert_eq!(UploadState::default(), UploadState::Idle);
    }

    #[test]
    fn terminal_states() {
        assert!(UploadState::CompletedSuccess.is_terminal());
        assert!(UploadState::CompletedError.is_terminal());
        assert!(!UploadState::Sending.is_terminal());
        assert!(UploadState::Sending.is_sending());
    }
}
