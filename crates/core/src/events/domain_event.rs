//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionKind;

/// Events emitted by core services after successful mutations.
///
/// Outer surfaces subscribe through a `DomainEventSink` and translate these
/// into their own notifications (SSE pushes, dashboard refreshes). Emission
/// is best-effort and never affects the outcome of the operation itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A NAV poll tick produced a fresh snapshot.
    NavUpdated {
        total_value_sats: u64,
        change_percent: Decimal,
    },

    /// Positions were added or revalued.
    PositionsChanged { position_ids: Vec<String> },

    /// A transaction was appended to the log.
    TransactionRecorded {
        txid: String,
        kind: TransactionKind,
    },

    /// A multisig-approved action was executed.
    ActionExecuted { action_id: String, kind: String },
}

impl DomainEvent {
    /// Creates a NavUpdated event.
    pub fn nav_updated(total_value_sats: u64, change_percent: Decimal) -> Self {
        Self::NavUpdated {
            total_value_sats,
            change_percent,
        }
    }

    /// Creates a PositionsChanged event.
    pub fn positions_changed(position_ids: Vec<String>) -> Self {
        Self::PositionsChanged { position_ids }
    }

    /// Creates a TransactionRecorded event.
    pub fn transaction_recorded(txid: String, kind: TransactionKind) -> Self {
        Self::TransactionRecorded { txid, kind }
    }

    /// Creates an ActionExecuted event.
    pub fn action_executed(action_id: String, kind: String) -> Self {
        Self::ActionExecuted { action_id, kind }
    }
}
