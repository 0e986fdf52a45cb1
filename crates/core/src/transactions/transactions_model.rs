//! Transaction domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a transaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Mint,
    Burn,
    Transfer,
    PositionEntry,
    PositionExit,
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

/// A single entry in the append-only transaction log.
///
/// Entries are never updated or deleted once recorded; a failed settlement
/// is represented by appending with `Failed` status, not by mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub txid: String,
    pub kind: TransactionKind,
    pub amount_sats: u64,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Free-form context (counterparty, payout address, position id)
    #[serde(default)]
    pub details: Value,
}

/// Input model for recording a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount_sats: u64,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub details: Value,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount_sats: u64) -> Self {
        Self {
            kind,
            amount_sats,
            status: TransactionStatus::Confirmed,
            details: Value::Null,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}
