//! Dashboard state
//!
//! Holds the list of transactions currently shown, oldest first. A refresh
//! replaces the whole list with what the store returns; a failed refresh
//! leaves the previous list in place. New entries are only added once the
//! store has confirmed them.

use chrono::{DateTime, Utc};

use super::breakdown::{category_split, income_expense_split, CategoryShare, IncomeExpenseSplit};
use super::summary::{aggregate, Summary};
use super::trend::{trend_points, TrendPoint};
use crate::error::CashlyResult;
use crate::models::{NewTransaction, SortKey, Transaction};
use crate::services::{ensure_summable, sorted_by, TransactionService};

#[derive(Debug, Default)]
pub struct Dashboard {
    transactions: Vec<Transaction>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh fetch
    ///
    /// Takes `&mut self`, so two refreshes of one dashboard cannot interleave.
    pub async fn refresh(&mut self, service: &TransactionService) -> CashlyResult<usize> {
        let transactions = service.load_all().await?;
        self.transactions = transactions;
        self.loaded_at = Some(Utc::now());
        Ok(self.transactions.len())
    }

    /// Submit a new entry and show it once the store confirms it
    pub async fn submit(
        &mut self,
        service: &TransactionService,
        new: NewTransaction,
    ) -> CashlyResult<Transaction> {
        let txn = service.add(new).await?;
        self.record(txn.clone())?;
        Ok(txn)
    }

    /// Insert a store-confirmed transaction, keeping timestamp order
    ///
    /// Refused with `MalformedRecord` if the list's totals would no longer
    /// be representable; the list is left unchanged in that case.
    pub fn record(&mut self, txn: Transaction) -> CashlyResult<()> {
        let index = self
            .transactions
            .partition_point(|t| t.timestamp <= txn.timestamp);
        self.transactions.insert(index, txn);
        if let Err(e) = ensure_summable(&self.transactions) {
            self.transactions.remove(index);
            return Err(e);
        }
        Ok(())
    }

    /// Transactions in ascending timestamp order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn summary(&self) -> Summary {
        aggregate(&self.transactions)
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        trend_points(&self.transactions)
    }

    pub fn sorted(&self, key: SortKey) -> Vec<Transaction> {
        sorted_by(&self.transactions, key)
    }

    pub fn category_split(&self) -> Vec<CategoryShare> {
        category_split(&self.transactions)
    }

    pub fn income_expense_split(&self) -> IncomeExpenseSplit {
        income_expense_split(&self.transactions)
    }
}
