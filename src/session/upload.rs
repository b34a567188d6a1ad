//! The upload session: collection, send, completion.

use crate::config::{Config, UploadMode};
use crate::coordinator::EventCoordinator;
use crate::dispatch::{CycleOutcome, Dispatcher, SessionEvent, SessionListener, SurfaceId, SurfaceKind};
use crate::mvi::Reducer;
use crate::payload::{FormPayload, MultipartBody};
use crate::transport::{RequestOptions, Transport, TransportError, TransportResponse};

use super::display::{ErrorDisplay, ErrorMessages};
use super::error::SessionError;
use super::file::PendingFile;
use super::intent::SessionIntent;
use super::preview::Preview;
use super::reducer::UploadReducer;
use super::state::UploadState;
use super::validation::{FileLimits, ValidationError};
use super::variant::UploadVariant;

/// Result of handing files to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOutcome {
    pub accepted: usize,
    pub rejected: Vec<ValidationError>,
    /// Auto mode wants the caller to send now. Always `false` while a send
    /// is in flight; files queued then are reported through
    /// [`UploadSession::send_requested`] once that send finishes.
    pub send_requested: bool,
}

/// Result of [`UploadSession::drop_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub collected: CollectOutcome,
    pub sent: Option<CycleOutcome>,
}

/// A rendered request waiting for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub body: MultipartBody,
    pub options: RequestOptions,
}

/// What [`UploadSession::begin_send`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStep {
    /// The session is `Sending`; hand the request to a transport.
    Ready(PreparedRequest),
    /// Nothing was sendable and the cycle ended on collection errors.
    Finished(CycleOutcome),
}

/// One upload widget: its surfaces, pending files, payload and guard.
///
/// The session lives as long as the widget. Each send cycle starts from an
/// empty payload and cleared processed flags.
pub struct UploadSession {
    mode: UploadMode,
    field_name: String,
    options: RequestOptions,
    limits: FileLimits,
    variant: UploadVariant,
    dispatcher: Dispatcher,
    coordinator: EventCoordinator,
    payload: FormPayload,
    state: UploadState,
    pending: Vec<PendingFile>,
    queued: Vec<PendingFile>,
    cycle_errors: Vec<ValidationError>,
    display: ErrorDisplay,
    last_outcome: Option<CycleOutcome>,
    /// Auto mode promoted queued files that still need a send.
    send_due: bool,
}

impl UploadSession {
    pub fn new(config: &Config, variant: UploadVariant) -> Self {
        Self {
            mode: config.upload.mode,
            field_name: config.upload.field_name.clone(),
            options: RequestOptions::from_config(config),
            limits: FileLimits::from(&config.limits),
            variant,
            dispatcher: Dispatcher::new(),
            coordinator: EventCoordinator::new(),
            payload: FormPayload::new(),
            state: UploadState::Idle,
            pending: Vec::new(),
            queued: Vec::new(),
            cycle_errors: Vec::new(),
            display: ErrorDisplay::new(ErrorMessages::with_overrides(&config.messages)),
            last_outcome: None,
            send_due: false,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn mode(&self) -> UploadMode {
        self.mode
    }

    pub fn variant(&self) -> &UploadVariant {
        &self.variant
    }

    pub fn pending_files(&self) -> &[PendingFile] {
        &self.pending
    }

    /// Files accepted while a send was in flight.
    pub fn queued_files(&self) -> &[PendingFile] {
        &self.queued
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    /// Whether auto mode wants another send.
    ///
    /// Set when a cycle ends with files that arrived during the send; the
    /// caller should run [`send`](Self::send) again. Cleared once a send
    /// starts or the pending list empties.
    pub fn send_requested(&self) -> bool {
        self.send_due
    }

    pub fn error_display(&self) -> &ErrorDisplay {
        &self.display
    }

    pub fn coordinator(&self) -> &EventCoordinator {
        &self.coordinator
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Whether the session holds as many files as it may.
    pub fn is_full(&self) -> bool {
        self.limits.is_full(self.held())
    }

    /// Previews for the pending files, when the variant has a previewer.
    pub fn previews(&self) -> Vec<Preview> {
        self.pending
            .iter()
            .filter_map(|file| self.variant.preview(file))
            .collect()
    }

    pub fn register_surface(&mut self, kind: SurfaceKind) -> SurfaceId {
        self.dispatcher.register_surface(kind)
    }

    pub fn unregister_surface(&mut self, surface: SurfaceId) -> bool {
        self.dispatcher
            .unregister_surface(surface, &mut self.coordinator)
    }

    pub fn add_listener(&mut self, listener: impl SessionListener + 'static) {
        self.dispatcher.add_listener(listener);
    }

    pub fn add_fn_listener<F>(&mut self, listener: F)
    where
        F: FnMut(SurfaceId, &mut SessionEvent<'_>) + 'static,
    {
        self.dispatcher.add_fn_listener(listener);
    }

    /// Validate and collect files dropped on (or picked through) `surface`.
    ///
    /// Rejected files produce errors instead of being added. While a send
    /// is in flight, accepted files wait for the next cycle.
    pub fn add_files<I>(&mut self, surface: SurfaceId, files: I) -> CollectOutcome
    where
        I: IntoIterator<Item = PendingFile>,
    {
        self.display.clear();
        self.dispatcher
            .raise(surface, &mut SessionEvent::BeforeCollect, &mut self.coordinator);

        let mut held = self.held();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            match self.limits.check(&file, held) {
                Ok(()) => {
                    held += 1;
                    accepted.push(file);
                }
                Err(error) => {
                    tracing::info!(file = %file.filename, kind = %error.kind, "file rejected");
                    rejected.push(error);
                }
            }
        }

        if !rejected.is_empty() {
            self.display.render(&rejected);
            self.cycle_errors.extend(rejected.iter().cloned());
        }

        self.dispatcher.raise(
            surface,
            &mut SessionEvent::AfterCollect {
                accepted: &accepted,
                rejected: &rejected,
            },
            &mut self.coordinator,
        );

        let accepted_count = accepted.len();
        if self.state.is_sending() {
            self.queued.extend(accepted);
        } else if accepted_count > 0 {
            self.pending.extend(accepted);
            self.apply(SessionIntent::FilesAccepted);
        }

        tracing::debug!(
            surface = %surface,
            accepted = accepted_count,
            rejected = rejected.len(),
            pending = self.pending.len(),
            queued = self.queued.len(),
            "files collected"
        );

        let collected_anything = accepted_count > 0 || !rejected.is_empty();
        CollectOutcome {
            accepted: accepted_count,
            send_requested: self.mode == UploadMode::Auto
                && !self.state.is_sending()
                && collected_anything,
            rejected,
        }
    }

    /// Drop a pending file. Emptying the list returns the session to idle.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        if index >= self.pending.len() {
            return None;
        }

        let removed = self.pending.remove(index);
        if self.pending.is_empty() {
            self.send_due = false;
            self.apply(SessionIntent::FilesEmptied);
            self.dispatcher
                .broadcast(&mut SessionEvent::RemoveFileEmpty, &mut self.coordinator);
        }
        Some(removed)
    }

    /// Enter `Sending`: build the payload, render it and settle the request
    /// options.
    ///
    /// Files come first, then the variant's contributors, then `before-send`
    /// listeners. The payload is rendered once and replaced by an empty one.
    pub fn begin_send(&mut self) -> Result<SendStep, SessionError> {
        match self.state {
            UploadState::Sending => return Err(SessionError::SendInProgress),
            UploadState::CollectingFiles => {}
            UploadState::Idle if !self.cycle_errors.is_empty() => {
                self.apply(SessionIntent::ValidationFailed);
                let errors = std::mem::take(&mut self.cycle_errors);
                return Ok(SendStep::Finished(self.fail_cycle(errors)));
            }
            UploadState::Idle => return Err(SessionError::NothingToSend),
            actual => {
                return Err(SessionError::InvalidState {
                    expected: UploadState::CollectingFiles,
                    actual,
                })
            }
        }

        self.apply(SessionIntent::SendRequested);
        self.send_due = false;

        let file_key = format!("files[{}]", self.field_name);
        for file in self.pending.drain(..) {
            self.payload.append(file_key.as_str(), file);
        }
        self.variant.contribute(&mut self.payload);
        self.dispatcher.broadcast(
            &mut SessionEvent::BeforeSend {
                payload: &mut self.payload,
            },
            &mut self.coordinator,
        );

        let body = std::mem::take(&mut self.payload).render();

        let mut options = self.options.clone();
        self.dispatcher.broadcast(
            &mut SessionEvent::SendOptions {
                options: &mut options,
            },
            &mut self.coordinator,
        );

        Ok(SendStep::Ready(PreparedRequest { body, options }))
    }

    /// Settle the in-flight send with the transport's result.
    ///
    /// Success raises `send-success`; failure renders the error list and
    /// raises `send-error`. Both end with `send-complete`, clear the
    /// processed flags and return to idle.
    pub fn finish_send(
        &mut self,
        result: Result<TransportResponse, TransportError>,
    ) -> Result<CycleOutcome, SessionError> {
        if !self.state.is_sending() {
            return Err(SessionError::InvalidState {
                expected: UploadState::Sending,
                actual: self.state,
            });
        }

        let outcome = match result {
            Ok(response) => {
                tracing::info!(status = response.status, "upload succeeded");
                self.apply(SessionIntent::TransportSucceeded);
                self.dispatcher.broadcast(
                    &mut SessionEvent::SendSuccess {
                        response: &response,
                    },
                    &mut self.coordinator,
                );
                let outcome = CycleOutcome::Succeeded {
                    status: response.status,
                };
                self.finalize(outcome);
                outcome
            }
            Err(error) => {
                tracing::warn!(error = %error, error_type = error.error_type(), "upload failed");
                self.apply(SessionIntent::TransportFailed);
                let mut errors = std::mem::take(&mut self.cycle_errors);
                errors.push(
                    ValidationError::new(ValidationError::TRANSPORT_FAILED)
                        .with_arg("@message", error.to_string()),
                );
                self.fail_cycle(errors)
            }
        };

        Ok(outcome)
    }

    /// Run one full send cycle through `transport`.
    pub async fn send<T: Transport>(&mut self, transport: &T) -> Result<CycleOutcome, SessionError> {
        let request = match self.begin_send()? {
            SendStep::Ready(request) => request,
            SendStep::Finished(outcome) => return Ok(outcome),
        };

        let result = transport.send(request.body, &request.options).await;
        self.finish_send(result)
    }

    /// Collect files and, in auto mode, send them right away.
    pub async fn drop_files<T, I>(
        &mut self,
        surface: SurfaceId,
        files: I,
        transport: &T,
    ) -> Result<DropOutcome, SessionError>
    where
        T: Transport,
        I: IntoIterator<Item = PendingFile>,
    {
        let collected = self.add_files(surface, files);
        let sent = if collected.send_requested || self.send_due {
            Some(self.send(transport).await?)
        } else {
            None
        };
        Ok(DropOutcome { collected, sent })
    }

    /// Raise `before-destroy` on every surface and detach them all.
    pub fn destroy(&mut self) {
        let ids: Vec<SurfaceId> = self.dispatcher.surfaces().iter().map(|s| s.id).collect();
        for id in ids {
            self.dispatcher.unregister_surface(id, &mut self.coordinator);
        }
    }

    fn held(&self) -> usize {
        self.pending.len() + self.queued.len()
    }

    fn apply(&mut self, intent: SessionIntent) {
        if let Some(previous) = UploadReducer::apply(&mut self.state, intent) {
            tracing::debug!(from = %previous, to = %self.state, ?intent, "upload state transition");
        }
    }

    fn fail_cycle(&mut self, errors: Vec<ValidationError>) -> CycleOutcome {
        self.display.render(&errors);
        self.dispatcher.broadcast(
            &mut SessionEvent::SendError { errors: &errors },
            &mut self.coordinator,
        );
        let outcome = CycleOutcome::Failed {
            errors: errors.len(),
        };
        self.finalize(outcome);
        outcome
    }

    fn finalize(&mut self, outcome: CycleOutcome) {
        self.dispatcher.broadcast(
            &mut SessionEvent::SendComplete { outcome },
            &mut self.coordinator,
        );
        self.coordinator.clear();
        self.cycle_errors.clear();
        self.last_outcome = Some(outcome);
        self.apply(SessionIntent::Finalized);

        if !self.queued.is_empty() {
            self.pending.append(&mut self.queued);
            self.apply(SessionIntent::FilesAccepted);
            self.send_due = self.mode == UploadMode::Auto;
            tracing::debug!(
                pending = self.pending.len(),
                send_due = self.send_due,
                "queued files promoted to the next cycle"
            );
        }
    }
}
