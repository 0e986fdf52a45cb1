//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionKind, TransactionStatus};
use crate::errors::Result;

/// Contract for transaction log storage.
///
/// The log is append-only: implementations expose no update or delete.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Appends a transaction to the log.
    async fn append(&self, transaction: Transaction) -> Result<Transaction>;

    /// Returns the full log, oldest first.
    fn list(&self) -> Result<Vec<Transaction>>;

    /// Retrieves a transaction by its txid.
    fn get_by_txid(&self, txid: &str) -> Result<Transaction>;
}

/// Contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Records a new transaction, assigning its txid and timestamp.
    async fn record(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Lists transactions, optionally filtered by kind and status.
    fn list_transactions(
        &self,
        kind_filter: Option<TransactionKind>,
        status_filter: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>>;

    /// Retrieves a transaction by its txid.
    fn get_transaction(&self, txid: &str) -> Result<Transaction>;
}
