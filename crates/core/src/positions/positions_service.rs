//! Position service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use super::positions_model::{NewPosition, Position, PositionStatus};
use super::positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::transactions::{NewTransaction, TransactionKind, TransactionServiceTrait};

/// Service for entering and revaluing fund positions.
pub struct PositionService {
    repository: Arc<dyn PositionRepositoryTrait>,
    transactions: Arc<dyn TransactionServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PositionService {
    pub fn new(
        repository: Arc<dyn PositionRepositoryTrait>,
        transactions: Arc<dyn TransactionServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            transactions,
            event_sink,
        }
    }
}

#[async_trait]
impl PositionServiceTrait for PositionService {
    async fn add_position(&self, new_position: NewPosition) -> Result<Position> {
        new_position.validate()?;

        let position = Position {
            id: Uuid::new_v4().to_string(),
            name: new_position.name.clone(),
            description: new_position.description.clone(),
            initial_value_sats: new_position.initial_value_sats,
            current_value_sats: new_position.initial_value_sats,
            change_percent: Decimal::ZERO,
            token_amount: new_position.token_amount,
            price_per_token_sats: new_position.effective_price_per_token(),
            transaction_id: new_position.transaction_id.clone(),
            address: new_position.address.clone(),
            position_type: new_position.position_type,
            status: PositionStatus::Active,
            entry_timestamp: Utc::now(),
        };

        debug!(
            "Entering position '{}' at {} sats",
            position.name, position.initial_value_sats
        );

        let added = self.repository.add(position).await?;

        self.transactions
            .record(
                NewTransaction::new(TransactionKind::PositionEntry, added.initial_value_sats)
                    .with_details(json!({
                        "positionId": added.id,
                        "name": added.name,
                    })),
            )
            .await?;

        self.event_sink
            .emit(DomainEvent::positions_changed(vec![added.id.clone()]));

        Ok(added)
    }

    fn get_positions(&self) -> Result<Vec<Position>> {
        self.repository.list()
    }

    fn get_position(&self, position_id: &str) -> Result<Position> {
        self.repository.get_by_id(position_id)
    }

    async fn exit_position(&self, position_id: &str) -> Result<Position> {
        let exited = self
            .repository
            .set_status(position_id, PositionStatus::Exited)
            .await?;

        debug!(
            "Exiting position '{}' at {} sats",
            exited.name, exited.current_value_sats
        );

        self.transactions
            .record(
                NewTransaction::new(TransactionKind::PositionExit, exited.current_value_sats)
                    .with_details(json!({
                        "positionId": exited.id,
                        "name": exited.name,
                    })),
            )
            .await?;

        self.event_sink
            .emit(DomainEvent::positions_changed(vec![exited.id.clone()]));

        Ok(exited)
    }

    /// Mock revaluation: a bounded random walk of +/-5% per step, standing in
    /// for oracle-driven repricing. A fixed seed makes the walk reproducible.
    async fn revalue_all(&self, seed: Option<u64>) -> Result<Vec<Position>> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut revalued = Vec::new();
        for position in self.repository.list()? {
            if position.status != PositionStatus::Active {
                continue;
            }

            let factor: f64 = 0.95 + rng.gen::<f64>() * 0.10;
            let next_value = (position.current_value_sats as f64 * factor).round() as u64;
            let updated = self
                .repository
                .update_valuation(&position.id, next_value)
                .await?;
            revalued.push(updated);
        }

        if !revalued.is_empty() {
            self.event_sink.emit(DomainEvent::positions_changed(
                revalued.iter().map(|p| p.id.clone()).collect(),
            ));
        }

        Ok(revalued)
    }
}
