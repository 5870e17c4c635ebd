//! Registered driver instances keyed by client name.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::source::MetricsSource;

pub type SharedSource = Arc<dyn MetricsSource>;

/// Concurrency-safe map from client name to its metrics source.
///
/// Each operation takes the lock once, so a reader sees either the state
/// before or after any single add, remove or clear. Cloning shares the map.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<RwLock<HashMap<String, SharedSource>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the client, or replaces the source registered under `name`.
    ///
    /// The replaced source is dropped by the registry but not otherwise
    /// closed.
    pub fn add_client(&self, name: impl Into<String>, source: SharedSource) {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), source);
    }

    pub fn remove_client(&self, name: &str) {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    pub fn clear(&self) {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copy of the current entries, in no particular order.
    ///
    /// The lock is released before returning, so sources are never read
    /// while it is held.
    pub fn snapshot(&self) -> Vec<(String, SharedSource)> {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, source)| (name.clone(), Arc::clone(source)))
            .collect()
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<String> = self.snapshot().into_iter().map(|(n, _)| n).collect();
        names.sort();
        f.debug_struct("ClientRegistry")
            .field("clients", &names)
            .finish()
    }
}
