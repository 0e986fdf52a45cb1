//! In-memory position ledger.

use std::sync::RwLock;

use async_trait::async_trait;
use log::warn;

use super::positions_model::{Position, PositionStatus};
use super::positions_traits::PositionRepositoryTrait;
use crate::errors::{Error, Result};

/// Mock-mode seed data, mirroring the dashboard's static fixture.
const PORTFOLIO_FIXTURE: &str = include_str!("../../fixtures/portfolio-positions.json");

/// Position ledger held in process memory.
///
/// Positions are only ever appended or revalued; nothing survives a restart.
#[derive(Default)]
pub struct InMemoryPositionRepository {
    positions: RwLock<Vec<Position>>,
}

impl InMemoryPositionRepository {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger seeded from the bundled fixture.
    pub fn seeded() -> Self {
        let positions: Vec<Position> = match serde_json::from_str(PORTFOLIO_FIXTURE) {
            Ok(positions) => positions,
            Err(err) => {
                warn!(
                    "Failed to parse portfolio-positions fixture: {}; starting empty",
                    err
                );
                Vec::new()
            }
        };
        Self {
            positions: RwLock::new(positions),
        }
    }
}

#[async_trait]
impl PositionRepositoryTrait for InMemoryPositionRepository {
    async fn add(&self, position: Position) -> Result<Position> {
        let mut positions = self
            .positions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        positions.push(position.clone());
        Ok(position)
    }

    fn list(&self) -> Result<Vec<Position>> {
        let positions = self
            .positions
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        Ok(positions.clone())
    }

    fn get_by_id(&self, position_id: &str) -> Result<Position> {
        let positions = self
            .positions
            .read()
            .map_err(|e| Error::Repository(e.to_string()))?;
        positions
            .iter()
            .find(|p| p.id == position_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Position {}", position_id)))
    }

    async fn update_valuation(
        &self,
        position_id: &str,
        current_value_sats: u64,
    ) -> Result<Position> {
        let mut positions = self
            .positions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        let position = positions
            .iter_mut()
            .find(|p| p.id == position_id)
            .ok_or_else(|| Error::NotFound(format!("Position {}", position_id)))?;

        position.current_value_sats = current_value_sats;
        position.recompute_change();
        Ok(position.clone())
    }

    async fn set_status(&self, position_id: &str, status: PositionStatus) -> Result<Position> {
        let mut positions = self
            .positions
            .write()
            .map_err(|e| Error::Repository(e.to_string()))?;
        let position = positions
            .iter_mut()
            .find(|p| p.id == position_id)
            .ok_or_else(|| Error::NotFound(format!("Position {}", position_id)))?;

        position.status = status;
        Ok(position.clone())
    }
}
