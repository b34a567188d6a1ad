//! Intents driving the upload state machine.

use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIntent {
    /// At least one file passed validation.
    FilesAccepted,
    /// The last pending file was removed.
    FilesEmptied,
    /// A send was triggered with files pending.
    SendRequested,
    /// A send was triggered but collection only produced errors.
    ValidationFailed,
    TransportSucceeded,
    TransportFailed,
    /// Terminal bookkeeping is done.
    Finalized,
}

impl Intent for SessionIntent {}
