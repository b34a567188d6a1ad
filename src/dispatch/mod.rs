//! Session-level event dispatch.
//!
//! Surfaces (drop zones, browse buttons, mirrors) register against one
//! [`Dispatcher`]; listeners register once. Raising an event from a surface
//! delivers it to every listener, and send-phase events pass through the
//! session's [`EventCoordinator`](crate::coordinator::EventCoordinator) so
//! their handlers run once per cycle however many surfaces raise them.

mod dispatcher;
mod event;
mod surface;

pub use dispatcher::{Dispatcher, SessionListener};
pub use event::{CycleOutcome, EventKind, SessionEvent};
pub use surface::{Surface, SurfaceId, SurfaceKind};
