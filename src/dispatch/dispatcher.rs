use crate::coordinator::EventCoordinator;

use super::event::SessionEvent;
use super::surface::{Surface, SurfaceId, SurfaceKind};

/// Receives session events.
pub trait SessionListener {
    fn on_event(&mut self, surface: SurfaceId, event: &mut SessionEvent<'_>);
}

struct FnListener<F>(F);

impl<F> SessionListener for FnListener<F>
where
    F: FnMut(SurfaceId, &mut SessionEvent<'_>),
{
    fn on_event(&mut self, surface: SurfaceId, event: &mut SessionEvent<'_>) {
        (self.0)(surface, event)
    }
}

/// Routes events raised by bound surfaces to the session's listeners.
#[derive(Default)]
pub struct Dispatcher {
    surfaces: Vec<Surface>,
    listeners: Vec<Box<dyn SessionListener>>,
    next_id: u32,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_surface(&mut self, kind: SurfaceKind) -> SurfaceId {
        let id = SurfaceId::new(self.next_id);
        self.next_id += 1;
        self.surfaces.push(Surface { id, kind });
        tracing::debug!(surface = %id, ?kind, "surface registered");
        id
    }

    /// Raise `before-destroy` on the surface, then detach it.
    ///
    /// Returns `false` when the surface is not bound.
    pub fn unregister_surface(
        &mut self,
        surface: SurfaceId,
        coordinator: &mut EventCoordinator,
    ) -> bool {
        if !self.is_bound(surface) {
            return false;
        }

        self.raise(surface, &mut SessionEvent::BeforeDestroy, coordinator);
        self.surfaces.retain(|s| s.id != surface);
        tracing::debug!(surface = %surface, "surface unregistered");
        true
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn is_bound(&self, surface: SurfaceId) -> bool {
        self.surfaces.iter().any(|s| s.id == surface)
    }

    pub fn add_listener(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_fn_listener<F>(&mut self, listener: F)
    where
        F: FnMut(SurfaceId, &mut SessionEvent<'_>) + 'static,
    {
        self.add_listener(FnListener(listener));
    }

    /// Deliver one raw event from one surface.
    ///
    /// Guarded events are dropped when they already ran in this cycle;
    /// otherwise the flag is set before any listener runs.
    pub fn raise(
        &mut self,
        surface: SurfaceId,
        event: &mut SessionEvent<'_>,
        coordinator: &mut EventCoordinator,
    ) {
        if !self.is_bound(surface) {
            tracing::debug!(surface = %surface, event = %event.kind(), "event from unbound surface ignored");
            return;
        }

        let kind = event.kind();
        if kind.is_guarded() {
            if coordinator.is_processed(kind.as_str()) {
                tracing::trace!(surface = %surface, event = %kind, "duplicate event suppressed");
                return;
            }
            coordinator.set_processed(kind.as_str());
        }

        for listener in &mut self.listeners {
            listener.on_event(surface, event);
        }
    }

    /// Raise `event` on every bound surface.
    pub fn broadcast(&mut self, event: &mut SessionEvent<'_>, coordinator: &mut EventCoordinator) {
        let ids: Vec<SurfaceId> = self.surfaces.iter().map(|s| s.id).collect();
        for id in ids {
            self.raise(id, event, coordinator);
        }
    }
}
