//! Position repository and service traits.
//!
//! Storage is injected behind the repository trait: in-memory for tests and
//! mock mode, a real ledger client once one exists.

use async_trait::async_trait;

use super::positions_model::{NewPosition, Position, PositionStatus};
use crate::errors::Result;

/// Contract for position ledger storage.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// Appends a position to the ledger.
    async fn add(&self, position: Position) -> Result<Position>;

    /// Returns a snapshot of all positions.
    fn list(&self) -> Result<Vec<Position>>;

    /// Retrieves a position by its ID.
    fn get_by_id(&self, position_id: &str) -> Result<Position>;

    /// Replaces the current valuation of a position, recomputing its change.
    async fn update_valuation(&self, position_id: &str, current_value_sats: u64)
        -> Result<Position>;

    /// Updates the lifecycle status of a position.
    async fn set_status(&self, position_id: &str, status: PositionStatus) -> Result<Position>;
}

/// Contract for position service operations.
#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    /// Validates and enters a new position.
    ///
    /// A freshly entered position carries `current == initial` and a zero
    /// change percentage.
    async fn add_position(&self, new_position: NewPosition) -> Result<Position>;

    /// Returns a snapshot of all positions.
    fn get_positions(&self) -> Result<Vec<Position>>;

    /// Retrieves a position by its ID.
    fn get_position(&self, position_id: &str) -> Result<Position>;

    /// Marks a position as exited and records the exit transaction.
    async fn exit_position(&self, position_id: &str) -> Result<Position>;

    /// Applies one mock revaluation step to every active position.
    async fn revalue_all(&self, seed: Option<u64>) -> Result<Vec<Position>>;
}
