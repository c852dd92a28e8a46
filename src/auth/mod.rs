//! Identity provider collaborators
//!
//! Authentication is delegated to an external identity service. The crate
//! only needs the narrow surface in [`IdentityProvider`]: create an account,
//! sign in (password or federated), sign out, read the current principal and
//! observe auth-state changes through a [`Subscription`] with defined
//! teardown.
//!
//! [`LocalIdentityProvider`] is a file-backed implementation for running the
//! tracker locally.

pub mod gate;
pub mod local;
pub mod observer;

pub use gate::{Access, AuthGate};
pub use local::LocalIdentityProvider;
pub use observer::{AuthCallback, AuthStateNotifier, Subscription};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CashlyResult;
use crate::models::UserId;

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// How the principal signed in ("password", "google", ...)
    pub provider: String,
}

impl Principal {
    /// Name to greet the user with: display name, else email, else id
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Email and password pair; the password is wiped from memory on drop
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Third-party sign-in providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
        }
    }
}

/// Interface to the external authentication service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in
    async fn sign_up(&self, credentials: &Credentials) -> CashlyResult<Principal>;

    /// Sign in with email and password
    async fn sign_in(&self, credentials: &Credentials) -> CashlyResult<Principal>;

    /// Sign in through a third-party provider
    async fn sign_in_federated(&self, provider: FederatedProvider) -> CashlyResult<Principal>;

    async fn sign_out(&self) -> CashlyResult<()>;

    /// The principal currently signed in, if any
    fn current_principal(&self) -> Option<Principal>;

    /// Observe auth-state changes
    ///
    /// The callback fires once immediately with the current principal and
    /// again on every sign-in or sign-out until the returned subscription
    /// is dropped.
    fn subscribe(&self, callback: AuthCallback) -> Subscription;
}
