//! Access gate for the aggregation views
//!
//! An `AuthGate` watches an identity provider and tracks whether the views
//! may be shown. It holds at most one subscription: watching again tears the
//! previous one down first, and dropping the gate releases it.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{IdentityProvider, Principal};

/// What the gate currently allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No auth state received yet
    Pending,
    Granted(Principal),
    Denied,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Consumer of auth-state changes guarding the dashboard
pub struct AuthGate {
    state: Arc<Mutex<Access>>,
    subscription: Option<super::Subscription>,
}

impl AuthGate {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Access::Pending)),
            subscription: None,
        }
    }

    /// Start following a provider, replacing any earlier subscription
    pub fn watch(&mut self, provider: &dyn IdentityProvider) {
        // Tear down before re-subscribing so two never overlap
        self.release();

        let state = Arc::clone(&self.state);
        let subscription = provider.subscribe(Arc::new(move |principal: Option<&Principal>| {
            let access = match principal {
                Some(p) => Access::Granted(p.clone()),
                None => Access::Denied,
            };
            debug!(granted = access.is_granted(), "auth gate updated");
            if let Ok(mut current) = state.lock() {
                *current = access;
            }
        }));
        self.subscription = Some(subscription);
    }

    /// Drop the subscription and return to the pending state
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Ok(mut current) = self.state.lock() {
            *current = Access::Pending;
        }
    }

    pub fn access(&self) -> Access {
        self.state
            .lock()
            .map(|access| access.clone())
            .unwrap_or(Access::Denied)
    }

    pub fn is_watching(&self) -> bool {
        self.subscription
            .as_ref()
            .map(|s| s.is_active())
            .unwrap_or(false)
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}
