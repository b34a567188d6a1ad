//! Named session events and their payloads.

use std::fmt;

use crate::payload::FormPayload;
use crate::session::{PendingFile, ValidationError};
use crate::transport::{RequestOptions, TransportResponse};

/// Event names, as seen by the processed-flag guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeforeCollect,
    AfterCollect,
    BeforeSend,
    SendOptions,
    SendSuccess,
    SendError,
    SendComplete,
    RemoveFileEmpty,
    BeforeDestroy,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BeforeCollect => "before-collect",
            EventKind::AfterCollect => "after-collect",
            EventKind::BeforeSend => "before-send",
            EventKind::SendOptions => "send-options",
            EventKind::SendSuccess => "send-success",
            EventKind::SendError => "send-error",
            EventKind::SendComplete => "send-complete",
            EventKind::RemoveFileEmpty => "remove-file-empty",
            EventKind::BeforeDestroy => "before-destroy",
        }
    }

    /// Send-phase events run their handlers once per cycle.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            EventKind::BeforeSend
                | EventKind::SendOptions
                | EventKind::SendSuccess
                | EventKind::SendError
                | EventKind::SendComplete
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a send cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Succeeded { status: u16 },
    Failed { errors: usize },
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Succeeded { .. })
    }
}

/// An event with its payload. `BeforeSend` and `SendOptions` hand out
/// mutable access so listeners can add fields or rewrite the request.
#[derive(Debug)]
pub enum SessionEvent<'a> {
    BeforeCollect,
    AfterCollect {
        accepted: &'a [PendingFile],
        rejected: &'a [ValidationError],
    },
    BeforeSend {
        payload: &'a mut FormPayload,
    },
    SendOptions {
        options: &'a mut RequestOptions,
    },
    SendSuccess {
        response: &'a TransportResponse,
    },
    SendError {
        errors: &'a [ValidationError],
    },
    SendComplete {
        outcome: CycleOutcome,
    },
    RemoveFileEmpty,
    BeforeDestroy,
}

impl SessionEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            SessionEvent::BeforeCollect => EventKind::BeforeCollect,
            SessionEvent::AfterCollect { .. } => EventKind::AfterCollect,
            SessionEvent::BeforeSend { .. } => EventKind::BeforeSend,
            SessionEvent::SendOptions { .. } => EventKind::SendOptions,
            SessionEvent::SendSuccess { .. } => EventKind::SendSuccess,
            SessionEvent::SendError { .. } => EventKind::SendError,
            SessionEvent::SendComplete { .. } => EventKind::SendComplete,
            SessionEvent::RemoveFileEmpty => EventKind::RemoveFileEmpty,
            SessionEvent::BeforeDestroy => EventKind::BeforeDestroy,
        }
    }
}
