//! Transaction service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use uuid::Uuid;

use super::transactions_model::{NewTransaction, Transaction, TransactionKind, TransactionStatus};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

/// Service for recording and querying the transaction log.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn record(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            txid: Uuid::new_v4().to_string(),
            kind: new_transaction.kind,
            amount_sats: new_transaction.amount_sats,
            timestamp: Utc::now(),
            status: new_transaction.status,
            details: new_transaction.details,
        };

        debug!(
            "Recording {:?} transaction {} for {} sats",
            transaction.kind, transaction.txid, transaction.amount_sats
        );

        let recorded = self.repository.append(transaction).await?;
        self.event_sink.emit(DomainEvent::transaction_recorded(
            recorded.txid.clone(),
            recorded.kind,
        ));
        Ok(recorded)
    }

    fn list_transactions(
        &self,
        kind_filter: Option<TransactionKind>,
        status_filter: Option<TransactionStatus>,
    ) -> Result<Vec<Transaction>> {
        let transactions = self.repository.list()?;
        Ok(transactions
            .into_iter()
            .filter(|t| kind_filter.map_or(true, |k| t.kind == k))
            .filter(|t| status_filter.map_or(true, |s| t.status == s))
            .collect())
    }

    fn get_transaction(&self, txid: &str) -> Result<Transaction> {
        self.repository.get_by_txid(txid)
    }
}
