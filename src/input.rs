use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use glam::Vec2;
use winit::event::WindowEvent;

use crate::pointer::PointerInputMapper;

#[derive(Default)]
struct HubState {
    viewport: Vec2,
    cursor: Option<Vec2>,
    next_id: u64,
    listeners: HashMap<u64, Vec2>,
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pointer event source shared by everything that reacts to the cursor.
///
/// The host forwards window events (or raw positions) here; each subscriber
/// sees the latest normalized pointer axes through its own
/// [`PointerSubscription`]. Dropping or unsubscribing a subscription stops
/// delivery to it. State lives behind a mutex so events delivered from
/// another context never tear a sample that a tick is reading.
#[derive(Clone, Default)]
pub struct PointerHub {
    state: Arc<Mutex<HubState>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Axes start at rest until the next pointer move.
    pub fn subscribe(&self) -> PointerSubscription {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, Vec2::ZERO);
        log::debug!("pointer subscription {} acquired", id);

        PointerSubscription {
            id,
            hub: Arc::downgrade(&self.state),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        lock(&self.state).listeners.len()
    }

    /// Process a window event and update pointer state.
    pub fn handle_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                lock(&self.state).cursor = None;
            }
            WindowEvent::Resized(size) => {
                self.set_viewport(Vec2::new(size.width as f32, size.height as f32));
            }
            _ => {}
        }
    }

    /// Record a pointer position in window pixels.
    pub fn pointer_moved(&self, position: Vec2) {
        let mut state = lock(&self.state);
        state.cursor = Some(position);
        let axes = PointerInputMapper::normalize(position, state.viewport);
        for slot in state.listeners.values_mut() {
            *slot = axes;
        }
    }

    /// Record the viewport size in pixels.
    ///
    /// Listener axes are recomputed from the last cursor position, so a
    /// resize doesn't leave the camera aiming at stale coordinates.
    pub fn set_viewport(&self, viewport: Vec2) {
        let mut state = lock(&self.state);
        state.viewport = viewport.max(Vec2::ZERO);
        if let Some(cursor) = state.cursor {
            let axes = PointerInputMapper::normalize(cursor, state.viewport);
            for slot in state.listeners.values_mut() {
                *slot = axes;
            }
        }
    }

    pub fn viewport(&self) -> Vec2 {
        lock(&self.state).viewport
    }

    /// Last cursor position in window pixels, if the cursor is over the window.
    pub fn cursor(&self) -> Option<Vec2> {
        lock(&self.state).cursor
    }
}

/// A scoped registration with a [`PointerHub`].
///
/// Released on drop; [`unsubscribe`](Self::unsubscribe) releases it early and
/// is safe to call more than once.
pub struct PointerSubscription {
    id: u64,
    hub: Weak<Mutex<HubState>>,
}

impl PointerSubscription {
    /// Latest normalized pointer axes, or zero once released.
    pub fn axes(&self) -> Vec2 {
        let Some(state) = self.hub.upgrade() else {
            return Vec2::ZERO;
        };
        let axes = lock(&state).listeners.get(&self.id).copied();
        axes.unwrap_or(Vec2::ZERO)
    }

    pub fn is_active(&self) -> bool {
        let Some(state) = self.hub.upgrade() else {
            return false;
        };
        let active = lock(&state).listeners.contains_key(&self.id);
        active
    }

    /// Stop receiving pointer updates.
    pub fn unsubscribe(&mut self) {
        if let Some(state) = self.hub.upgrade() {
            if lock(&state).listeners.remove(&self.id).is_some() {
                log::debug!("pointer subscription {} released", self.id);
            }
        }
        self.hub = Weak::new();
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
