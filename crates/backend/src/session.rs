//! Session cell plus auth-change fan-out, shared by every adapter variant.

use std::sync::{Arc, Mutex};

use gymtrack_core::auth::{AuthEvent, AuthEventBus, AuthSession, AuthSubscription};

pub(crate) struct SessionState {
    current: Mutex<Option<AuthSession>>,
    events: Arc<AuthEventBus>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            events: AuthEventBus::new(),
        }
    }

    pub fn install(&self, session: AuthSession) {
        *self.current.lock().expect("session lock poisoned") = Some(session.clone());
        self.events.emit(&AuthEvent::SignedIn(session));
    }

    /// Drop the session. Emits `SignedOut` only when there was one.
    pub fn clear(&self) {
        let had_session = self
            .current
            .lock()
            .expect("session lock poisoned")
            .take()
            .is_some();
        if had_session {
            self.events.emit(&AuthEvent::SignedOut);
        }
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.current.lock().expect("session lock poisoned").clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn subscribe(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> AuthSubscription {
        self.events.subscribe(listener)
    }
}
