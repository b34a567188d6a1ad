//! Once-per-cycle guard for events raised by several surfaces.
//!
//! Every surface bound to a session raises the same named events. Guarded
//! handlers follow check-then-set-then-run: read the flag, bail out if it is
//! already set, otherwise set it before running the body. The flags live for
//! one send cycle and are cleared at its terminal transition.

use std::collections::HashMap;

/// Processed flags for one upload session, keyed by event name.
#[derive(Debug, Clone, Default)]
pub struct EventCoordinator {
    processed: HashMap<String, bool>,
}

impl EventCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `event` already ran in this cycle. Never modifies the flags.
    pub fn is_processed(&self, event: &str) -> bool {
        self.processed.get(event).copied().unwrap_or(false)
    }

    pub fn set_processed(&mut self, event: &str) {
        self.processed.insert(event.to_string(), true);
    }

    /// Reset every flag so the next cycle starts fresh.
    pub fn clear(&mut self) {
        for flag in self.processed.values_mut() {
            *flag = false;
        }
    }

    /// Run `body` unless `event` already ran in this cycle.
    pub fn run_once<R>(&mut self, event: &str, body: impl FnOnce() -> R) -> Option<R> {
        if self.is_processed(event) {
            tracing::trace!(event, "event already processed in this cycle");
            return None;
        }
        self.set_processed(event);
        Some(body())
    }

    /// Names of the events that ran in this cycle.
    pub fn processed_events(&self) -> impl Iterator<Item = &str> {
        self.processed
            .iter()
            .filter(|(_, flag)| **flag)
            .map(|(name, _)| name.as_str())
    }
}
