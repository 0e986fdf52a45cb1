//! In-memory transaction log.

use std::sync::RwLock;

use async_trait::async_trait;
use log::warn;

use super::transactions_model::Transaction;
use super::transactions_traits::TransactionRepositoryTrait;
use crate::errors::{Error, Result};

/// Mock-mode seed data, mirroring the dashboard's static fixture.
const TOKEN_DATA_FIXTURE: &str = include_str!("../../fixtures/token-data.json");

/// Append-only transaction log held in process memory.
///
/// Nothing survives a restart; mock mode reseeds from the bundled fixture.
#[derive(Default)]
pub struct InMemoryTransactionLog {
    entries: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log seeded from the bundled fixture.
    pub fn seeded() -> Self {
        let entries: Vec<Transaction> = match serde_json::from_str(TOKEN_DATA_FIXTURE) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to parse token-data fixture: {}; starting empty", err);
                Vec::new()
            }
        };
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionLog {
    async fn append(&self, transaction: Transaction) -> Result<Transaction> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        entries.push(transaction.clone());
        Ok(transaction)
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        Ok(entries.clone())
    }

    fn get_by_txid(&self, txid: &str) -> Result<Transaction> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        entries
            .iter()
            .find(|t| t.txid == txid)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", txid)))
    }
}
