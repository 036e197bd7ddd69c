use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use super::session::AuthEvent;

type Listener = Box<dyn Fn(&AuthEvent) + Send + Sync>;

/// Fan-out point for auth state changes. Backends own one and emit on every
/// session transition; the presentation layer subscribes through the store.
#[derive(Default)]
pub struct AuthEventBus {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl AuthEventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe(self: &Arc<Self>, listener: Listener) -> AuthSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("auth listener lock poisoned")
            .push((id, listener));
        AuthSubscription {
            id,
            bus: Arc::downgrade(self),
        }
    }

    pub fn emit(&self, event: &AuthEvent) {
        let listeners = self.listeners.lock().expect("auth listener lock poisoned");
        for (_, listener) in listeners.iter() {
            listener(event);
        }
    }
}

/// Handle returned by [`AuthEventBus::subscribe`]. Dropping it keeps the
/// listener alive; call [`AuthSubscription::unsubscribe`] to detach.
pub struct AuthSubscription {
    id: u64,
    bus: Weak<AuthEventBus>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners
                .lock()
                .expect("auth listener lock poisoned")
                .retain(|(id, _)| *id != self.id);
        }
    }
}
