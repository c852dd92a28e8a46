//! Local identity provider
//!
//! Accounts are kept in `users.json` with argon2 password hashes and the
//! signed-in principal in `session.json`, so a sign-in survives between
//! command invocations. An ephemeral variant keeps everything in memory.

use std::path::PathBuf;
use std::sync::RwLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::observer::{AuthCallback, AuthStateNotifier, Subscription};
use super::{Credentials, FederatedProvider, IdentityProvider, Principal};
use crate::config::CashlyPaths;
use crate::error::{CashlyError, CashlyResult};
use crate::models::UserId;
use crate::store::{read_json, write_json_atomic};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: UserId,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    users: Vec<StoredUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    principal: Option<Principal>,
}

/// Identity provider backed by local files (or memory)
pub struct LocalIdentityProvider {
    users_path: Option<PathBuf>,
    session_path: Option<PathBuf>,
    users: RwLock<Vec<StoredUser>>,
    notifier: AuthStateNotifier,
}

impl LocalIdentityProvider {
    /// Open the provider over the account and session files
    pub fn open(paths: &CashlyPaths) -> CashlyResult<Self> {
        let users: UserData = read_json(paths.users_file())?;
        let session: SessionData = read_json(paths.session_file())?;

        Ok(Self {
            users_path: Some(paths.users_file()),
            session_path: Some(paths.session_file()),
            users: RwLock::new(users.users),
            notifier: AuthStateNotifier::new(session.principal),
        })
    }

    /// A provider that keeps accounts and the session in memory only
    pub fn ephemeral() -> Self {
        Self {
            users_path: None,
            session_path: None,
            users: RwLock::new(Vec::new()),
            notifier: AuthStateNotifier::default(),
        }
    }

    /// Number of live auth-state subscriptions
    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }

    fn validate(credentials: &Credentials) -> CashlyResult<()> {
        let email = credentials.email.as_str();
        let well_formed = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !well_formed {
            return Err(CashlyError::Auth(format!("Invalid email address '{}'", email)));
        }
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(CashlyError::Auth(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn hash_password(password: &str) -> CashlyResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CashlyError::Auth(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!(error = %e, "stored password hash is unreadable");
                false
            }
        }
    }

    fn save_users(&self, users: &[StoredUser]) -> CashlyResult<()> {
        if let Some(path) = &self.users_path {
            write_json_atomic(
                path,
                &UserData {
                    users: users.to_vec(),
                },
            )?;
        }
        Ok(())
    }

    fn set_session(&self, principal: Option<Principal>) -> CashlyResult<()> {
        if let Some(path) = &self.session_path {
            write_json_atomic(
                path,
                &SessionData {
                    principal: principal.clone(),
                },
            )?;
        }
        self.notifier.publish(principal);
        Ok(())
    }

    fn principal_for(user: &StoredUser) -> Principal {
        Principal {
            id: user.id.clone(),
            email: Some(user.email.clone()),
            display_name: None,
            provider: "password".into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> CashlyResult<Principal> {
        Self::validate(credentials)?;

        let principal = {
            let mut users = self
                .users
                .write()
                .map_err(|e| CashlyError::Auth(format!("Failed to acquire write lock: {}", e)))?;

            if users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&credentials.email))
            {
                return Err(CashlyError::Auth(format!(
                    "An account already exists for {}",
                    credentials.email
                )));
            }

            let user = StoredUser {
                id: UserId::generate(),
                email: credentials.email.clone(),
                password_hash: Self::hash_password(&credentials.password)?,
                created_at: Utc::now(),
            };
            let principal = Self::principal_for(&user);
            users.push(user);
            if let Err(e) = self.save_users(&users) {
                users.pop();
                warn!(error = %e, "account not created");
                return Err(e);
            }
            principal
        };

        info!(user = %principal.id, "account created");
        self.set_session(Some(principal.clone()))?;
        Ok(principal)
    }

    async fn sign_in(&self, credentials: &Credentials) -> CashlyResult<Principal> {
        let principal = {
            let users = self
                .users
                .read()
                .map_err(|e| CashlyError::Auth(format!("Failed to acquire read lock: {}", e)))?;

            users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(&credentials.email))
                .filter(|u| Self::verify_password(&credentials.password, &u.password_hash))
                .map(Self::principal_for)
                .ok_or_else(|| CashlyError::Auth("Invalid email or password".into()))?
        };

        info!(user = %principal.id, "signed in");
        self.set_session(Some(principal.clone()))?;
        Ok(principal)
    }

    async fn sign_in_federated(&self, provider: FederatedProvider) -> CashlyResult<Principal> {
        Err(CashlyError::Auth(format!(
            "Sign-in with {} is not available with the local identity provider",
            provider
        )))
    }

    async fn sign_out(&self) -> CashlyResult<()> {
        if let Some(principal) = self.notifier.current() {
            info!(user = %principal.id, "signed out");
        }
        self.set_session(None)
    }

    fn current_principal(&self) -> Option<Principal> {
        self.notifier.current()
    }

    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        self.notifier.subscribe(callback)
    }
}
