//! Reducer for upload session state transitions.

use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::UploadState;

/// Reducer for upload lifecycle transitions.
pub struct UploadReducer;

impl Reducer for UploadReducer {
    type State = UploadState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        use UploadState::*;

        match (state, intent) {
            // Files accepted while sending belong to the next cycle.
            (Idle | CollectingFiles, SessionIntent::FilesAccepted) => CollectingFiles,
            (CollectingFiles, SessionIntent::FilesEmptied) => Idle,
            (CollectingFiles, SessionIntent::SendRequested) => Sending,
            (Idle | CollectingFiles, SessionIntent::ValidationFailed) => CompletedError,
            (Sending, SessionIntent::TransportSucceeded) => CompletedSuccess,
            (Sending, SessionIntent::TransportFailed) => CompletedError,
            (CompletedSuccess | CompletedError, SessionIntent::Finalized) => Idle,
            (other, _) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_accepted_starts_collecting() {
        let state = UploadReducer::reduce(UploadState::Idle, SessionIntent::FilesAccepted);
        assert_eq!(state, UploadState::CollectingFiles);

        let state = UploadReducer::reduce(state, SessionIntent::FilesAccepted);
        assert_eq!(state, UploadState::CollectingFiles);
    }

    #[test]
    fn files_accepted_while_sending_keeps_sending() {
        let state = UploadReducer::reduce(UploadState::Sending, SessionIntent::FilesAccepted);
        assert_eq!(state, UploadState::Sending);
    }

    #[test]
    fn send_requires_collected_files() {
        assert_eq!(
            UploadReducer::reduce(UploadState::Idle, SessionIntent::SendRequested),
            UploadState::Idle
        );
        assert_eq!(
            UploadReducer::reduce(UploadState::CollectingFiles, SessionIntent::SendRequested),
            UploadState::Sending
        );
    }

    #[test]
    fn success_cycle_returns_to_idle() {
        let state = UploadReducer::reduce(UploadState::Sending, SessionIntent::TransportSucceeded);
        assert_eq!(state, UploadState::CompletedSuccess);

        let state = UploadReducer::reduce(state, SessionIntent::Finalized);
        assert_eq!(state, UploadState::Idle);
    }

    #[test]
    fn error_cycle_returns_to_idle() {
        let state = UploadReducer::reduce(UploadState::Sending, SessionIntent::TransportFailed);
        assert_eq!(state, UploadState::CompletedError);

        let state = UploadReducer::reduce(state, SessionIntent::Finalized);
        assert_eq!(state, UploadState::Idle);
    }

    #[test]
    fn validation_failure_is_terminal_error() {
        assert_eq!(
            UploadReducer::reduce(UploadState::Idle, SessionIntent::ValidationFailed),
            UploadState::CompletedError
        );
        assert_eq!(
            UploadReducer::reduce(UploadState::Sending, SessionIntent::ValidationFailed),
            UploadState::Sending
        );
    }

    #[test]
    fn emptied_returns_to_idle() {
        assert_eq!(
            UploadReducer::reduce(UploadState::CollectingFiles, SessionIntent::FilesEmptied),
            UploadState::Idle
        );
    }

    #[test]
    fn transport_results_ignored_outside_sending() {
        assert_eq!(
            UploadReducer::reduce(UploadState::Idle, SessionIntent::TransportSucceeded),
            UploadState::Idle
        );
    }
}
