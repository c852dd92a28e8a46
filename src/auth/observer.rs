//! Auth-state observer with explicit teardown
//!
//! Listeners register a callback and receive a [`Subscription`]. Dropping the
//! subscription (or calling [`Subscription::unsubscribe`]) detaches the
//! callback; nothing is notified after that.

use std::sync::{Arc, Mutex, Weak};

use tracing::trace;

use super::Principal;

/// Callback invoked with the current principal (or `None` when signed out)
pub type AuthCallback = Arc<dyn Fn(Option<&Principal>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, AuthCallback)>,
}

/// Fans auth-state changes out to subscribed callbacks
pub struct AuthStateNotifier {
    registry: Arc<Mutex<Registry>>,
    current: Mutex<Option<Principal>>,
}

impl AuthStateNotifier {
    pub fn new(initial: Option<Principal>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            current: Mutex::new(initial),
        }
    }

    pub fn current(&self) -> Option<Principal> {
        self.current
            .lock()
            .map(|current| current.clone())
            .unwrap_or(None)
    }

    /// Register a callback and deliver the current state to it right away
    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let id = match self.registry.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.listeners.push((id, Arc::clone(&callback)));
                id
            }
            Err(_) => return Subscription::detached(),
        };
        trace!(subscription = id, "auth listener subscribed");

        let current = self.current();
        callback(current.as_ref());

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Record a new auth state and notify every live listener
    pub fn publish(&self, principal: Option<Principal>) {
        if let Ok(mut current) = self.current.lock() {
            *current = principal.clone();
        }

        // Callbacks run without the registry lock held so they may
        // subscribe or unsubscribe themselves.
        let listeners: Vec<AuthCallback> = match self.registry.lock() {
            Ok(registry) => registry
                .listeners
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect(),
            Err(_) => return,
        };

        for listener in listeners {
            listener(principal.as_ref());
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.listeners.len())
            .unwrap_or(0)
    }
}

impl Default for AuthStateNotifier {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Handle to a registered auth-state callback
///
/// Unsubscribes on drop.
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// A subscription that is not attached to any notifier
    pub fn detached() -> Self {
        Self {
            id: u64::MAX,
            registry: Weak::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = match registry.lock() {
            Ok(registry) => registry.listeners.iter().any(|(id, _)| *id == self.id),
            Err(_) => false,
        };
        active
    }

    /// Detach the callback now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.listeners.retain(|(id, _)| *id != self.id);
                trace!(subscription = self.id, "auth listener unsubscribed");
            }
        }
    }
}
