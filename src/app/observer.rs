// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/observer.rs
//
// "Constraint changed" listeners.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change listeners over a subject `S`.
///
/// Listeners receive the subject by shared reference and pull whatever they
/// need from it; nothing is pushed with the notification.
pub struct ConstraintObservers<S: ?Sized> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn FnMut(&S)>)>,
}

impl<S: ?Sized> Default for ConstraintObservers<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for ConstraintObservers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstraintObservers({} listeners)", self.listeners.len())
    }
}

impl<S: ?Sized> ConstraintObservers<S> {
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, subject: &S) {
        for (_, listener) in &mut self.listeners {
            listener(subject);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
