use anyhow::{Context, Result};
use parking_lot::RwLock;

use crate::NotificationBridge;

/// Process-wide slot for a bridge that is attached on first use. A failed
/// attach leaves the slot empty so the next call tries again.
pub struct SharedBridge {
    slot: RwLock<Option<NotificationBridge>>,
}

impl SharedBridge {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.read().is_some()
    }

    pub fn with<T>(
        &self,
        attach: impl FnOnce() -> Result<NotificationBridge>,
        f: impl FnOnce(&NotificationBridge) -> Result<T>,
    ) -> Result<T> {
        {
            let guard = self.slot.read();
            if let Some(bridge) = guard.as_ref() {
                return f(bridge);
            }
        }
        let mut guard = self.slot.write();
        if guard.is_none() {
            *guard = Some(attach()?);
        }
        let bridge = guard
            .as_ref()
            .context("notification bridge failed to initialise")?;
        f(bridge)
    }
}

impl Default for SharedBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use countdown_notify::{memory::InMemoryBackend, NotificationService};

    use super::*;
    use crate::{MethodCall, MethodResponse};

    fn attach_on(backend: &Arc<InMemoryBackend>) -> Result<NotificationBridge> {
        let service = NotificationService::builder().build(Box::new(Arc::clone(backend)));
        NotificationBridge::attach(service)
    }

    #[test]
    fn attaches_once_across_calls() {
        let backend = Arc::new(InMemoryBackend::for_sdk(30));
        let shared = SharedBridge::new();
        let attaches = Cell::new(0);
        for _ in 0..3 {
            let response = shared
                .with(
                    || {
                        attaches.set(attaches.get() + 1);
                        attach_on(&backend)
                    },
                    |bridge| Ok(bridge.handle(&MethodCall::new("showNotification"))),
                )
                .unwrap();
            assert_eq!(response, MethodResponse::success());
        }
        assert_eq!(attaches.get(), 1);
        assert!(shared.is_attached());
        assert_eq!(backend.active().len(), 1);
    }

    #[test]
    fn failed_attach_is_retried() {
        let shared = SharedBridge::new();
        let first = shared.with(|| anyhow::bail!("host not ready"), |_| Ok(()));
        assert!(first.is_err());
        assert!(!shared.is_attached());

        let backend = Arc::new(InMemoryBackend::for_sdk(34));
        shared.with(|| attach_on(&backend), |_| Ok(())).unwrap();
        assert!(shared.is_attached());
    }
}
