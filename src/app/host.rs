// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/host.rs
//
// Host container interface: where the drawing surface lives and where
// pointer listeners are registered.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::SurfaceId;

/// Identity of a registered listener, kept for exact removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Only the drawing surface.
    Surface(SurfaceId),
    /// The whole input surface, so drags leaving the drawing surface keep
    /// being tracked.
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Press,
    Move,
    Release,
}

/// A container the engine can attach its drawing surface to.
///
/// The host owns event delivery: it forwards pointer events to
/// [`crate::CropEngine::update`] only for targets that have listeners.
pub trait HostContainer {
    /// Insert the surface as the first child.
    fn insert_first(&mut self, surface: SurfaceId);

    /// Returns `false` if the surface was not a child.
    fn remove_child(&mut self, surface: SurfaceId) -> bool;

    fn add_listener(&mut self, target: ListenerTarget, event: PointerEvent) -> ListenerId;

    /// Returns `false` if the id was unknown.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// Shared handle to a host container. The engine and the host both live on
/// the UI thread.
pub type HostHandle = Rc<RefCell<dyn HostContainer>>;

/// In-memory host used by the command line front end and in tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    children: Vec<SurfaceId>,
    listeners: Vec<(ListenerId, ListenerTarget, PointerEvent)>,
    next_listener: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor returning a shareable handle alongside a
    /// typed one for inspection.
    pub fn shared() -> (Rc<RefCell<MemoryHost>>, HostHandle) {
        let host = Rc::new(RefCell::new(Self::new()));
        let handle: HostHandle = host.clone();
        (host, handle)
    }

    pub fn children(&self) -> &[SurfaceId] {
        &self.children
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether anything listens for `event` on `target`.
    pub fn is_listening(&self, target: ListenerTarget, event: PointerEvent) -> bool {
        self.listeners
            .iter()
            .any(|(_, t, e)| *t == target && *e == event)
    }

    pub fn count_listeners(&self, target: ListenerTarget, event: PointerEvent) -> usize {
        self.listeners
            .iter()
            .filter(|(_, t, e)| *t == target && *e == event)
            .count()
    }
}

impl HostContainer for MemoryHost {
    fn insert_first(&mut self, surface: SurfaceId) {
        self.children.retain(|s| *s != surface);
        self.children.insert(0, surface);
    }

    fn remove_child(&mut self, surface: SurfaceId) -> bool {
        let before = self.children.len();
        self.children.retain(|s| *s != surface);
        self.children.len() != before
    }

    fn add_listener(&mut self, target: ListenerTarget, event: PointerEvent) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId::new(self.next_listener);
        self.listeners.push((id, target, event));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::DrawingSurface;

    #[test]
    fn insert_first_puts_surface_in_front_once() {
        let a = DrawingSurface::new(1, 1).unwrap().id();
        let b = DrawingSurface::new(1, 1).unwrap().id();
        let mut host = MemoryHost::new();

        host.insert_first(a);
        host.insert_first(b);
        host.insert_first(a);
        assert_eq!(host.children(), &[a, b]);

        assert!(host.remove_child(a));
        assert!(!host.remove_child(a));
    }

    #[test]
    fn listeners_are_removed_by_id() {
        let mut host = MemoryHost::new();
        let press = host.add_listener(ListenerTarget::Document, PointerEvent::Press);
        host.add_listener(ListenerTarget::Document, PointerEvent::Move);

        assert!(host.remove_listener(press));
        assert!(!host.is_listening(ListenerTarget::Document, PointerEvent::Press));
        assert!(host.is_listening(ListenerTarget::Document, PointerEvent::Move));
        assert!(!host.remove_listener(press));
    }
}
