//! Transaction service
//!
//! Submits new transactions to the document store and fetches the full
//! collection back as normalized, chronologically ordered transactions.
//! Both calls require a signed-in principal. Store and identity handles are
//! passed in explicitly; nothing here reaches for a process-wide client.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{debug, info, warn};

use super::normalize::normalize;
use super::sort::sort_chronologically;
use crate::auth::{IdentityProvider, Principal};
use crate::config::Settings;
use crate::error::{CashlyError, CashlyResult};
use crate::models::{NewTransaction, Transaction, TransactionId};
use crate::store::{DocumentStore, OrderDirection};

/// Service for recording and loading transactions
pub struct TransactionService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    collection: String,
    order_field: String,
}

impl TransactionService {
    /// Create a service using the collection named in the settings
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        settings: &Settings,
    ) -> Self {
        Self::with_collection(
            store,
            identity,
            settings.collection.clone(),
            settings.order_field.clone(),
        )
    }

    pub fn with_collection(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        collection: impl Into<String>,
        order_field: impl Into<String>,
    ) -> Self {
        Self {
            store,
            identity,
            collection: collection.into(),
            order_field: order_field.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn require_principal(&self) -> CashlyResult<Principal> {
        self.identity
            .current_principal()
            .ok_or(CashlyError::AuthRequired)
    }

    /// Record a new transaction
    ///
    /// Returns the transaction as confirmed by the store, carrying the id it
    /// assigned. Nothing is returned (or shown) before the store confirms.
    pub async fn add(&self, new: NewTransaction) -> CashlyResult<Transaction> {
        let principal = self.require_principal()?;

        new.validate()
            .map_err(|e| CashlyError::Validation(e.to_string()))?;

        // Stored timestamps keep millisecond precision
        let timestamp = Utc::now().trunc_subsecs(3);
        let record = new.to_record(timestamp);

        let id = self
            .store
            .insert(&self.collection, record)
            .await
            .map_err(|e| {
                warn!(collection = %self.collection, error = %e, "insert failed");
                e
            })?;

        let txn = new.into_transaction(TransactionId::new(id), timestamp);
        info!(
            user = %principal.id,
            id = %txn.id,
            direction = %txn.direction(),
            "transaction recorded"
        );
        Ok(txn)
    }

    /// Fetch and normalize every transaction, oldest first
    ///
    /// Fails as a whole if any stored record is malformed.
    pub async fn load_all(&self) -> CashlyResult<Vec<Transaction>> {
        let principal = self.require_principal()?;

        let documents = self
            .store
            .query_all(&self.collection, &self.order_field, OrderDirection::Ascending)
            .await
            .map_err(|e| {
                warn!(collection = %self.collection, error = %e, "query failed");
                e
            })?;

        let mut transactions = normalize(&documents)?;
        // Legacy records may be ordered by a different field than `timestamp`
        sort_chronologically(&mut transactions);

        debug!(user = %principal.id, count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }
}
