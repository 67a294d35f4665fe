//! Atomic-swap publication handle for the control registry.

use std::sync::{Arc, RwLock};

use super::ControlRegistry;

/// Shared handle to the current registry.
///
/// Readers take a cheap `Arc` snapshot and keep using it for the whole
/// run; [`publish`](Self::publish) replaces the registry wholesale, so a
/// run never observes a partially updated registry.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Arc<ControlRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: ControlRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// Snapshot of the currently published registry.
    pub fn current(&self) -> Arc<ControlRegistry> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Publish a fully built registry, replacing the previous one.
    pub fn publish(&self, registry: ControlRegistry) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Arc::new(registry);
    }
}
