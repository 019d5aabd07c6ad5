//! Ordered listener registries with token-based removal

use std::sync::{Mutex, PoisonError};

/// Kind of transport event a subscription is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Typing,
    Presence,
}

/// Handle returned from listener registration. Its sole purpose is to
/// unregister the listener, so registering the same closure twice stays
/// unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub(crate) kind: EventKind,
    pub(crate) token: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Ordered sequence of listeners for one event kind
pub(crate) struct Registry<F> {
    entries: Mutex<Vec<(u64, F)>>,
}

impl<F: Clone> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append a listener; insertion order is delivery order
    pub fn insert(&self, token: u64, listener: F) {
        self.lock().push((token, listener));
    }

    /// Remove the first entry with a matching token. No-op if absent.
    pub fn remove(&self, token: u64) {
        let mut entries = self.lock();
        if let Some(pos) = entries.iter().position(|(t, _)| *t == token) {
            entries.remove(pos);
        }
    }

    /// Snapshot taken at the start of each fan-out, so listeners added or
    /// removed mid-delivery only affect future events.
    pub fn snapshot(&self) -> Vec<F> {
        self.lock().iter().map(|(_, f)| f.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(u64, F)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
