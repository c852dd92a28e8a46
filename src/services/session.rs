//! Session service
//!
//! Thin wrapper over the identity provider used by the front end: account
//! creation, sign-in, sign-out and an [`AuthGate`] for the dashboard.

use std::sync::Arc;

use crate::auth::{AuthGate, Credentials, FederatedProvider, IdentityProvider, Principal};
use crate::error::{CashlyError, CashlyResult};

/// Service for sign-in state
pub struct SessionService {
    identity: Arc<dyn IdentityProvider>,
}

impl SessionService {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> CashlyResult<Principal> {
        self.identity.sign_up(credentials).await
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> CashlyResult<Principal> {
        self.identity.sign_in(credentials).await
    }

    pub async fn sign_in_federated(&self, provider: FederatedProvider) -> CashlyResult<Principal> {
        self.identity.sign_in_federated(provider).await
    }

    pub async fn sign_out(&self) -> CashlyResult<()> {
        self.identity.sign_out().await
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.identity.current_principal()
    }

    /// The signed-in principal, or `AuthRequired`
    pub fn require_principal(&self) -> CashlyResult<Principal> {
        self.current_principal().ok_or(CashlyError::AuthRequired)
    }

    /// A gate already watching this service's provider
    pub fn gate(&self) -> AuthGate {
        let mut gate = AuthGate::new();
        gate.watch(self.identity.as_ref());
        gate
    }
}
