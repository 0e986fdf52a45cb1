//! Position domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Whether a position was entered before or after the project's token
/// generation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionType {
    PreTge,
    PostTge,
}

/// Lifecycle state of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    #[default]
    Active,
    Exited,
}

/// A portfolio position held by the fund.
///
/// Positions are append-only: entries are revalued over time and may be
/// marked `Exited`, but are never removed from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Value in sats at entry.
    pub initial_value_sats: u64,
    /// Value in sats at the latest revaluation.
    pub current_value_sats: u64,
    /// Percentage change from initial to current value.
    pub change_percent: Decimal,
    pub token_amount: u64,
    pub price_per_token_sats: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub position_type: PositionType,
    pub status: PositionStatus,
    pub entry_timestamp: DateTime<Utc>,
}

impl Position {
    /// Recomputes `change_percent` from the initial and current values.
    pub fn recompute_change(&mut self) {
        self.change_percent = change_percent(self.initial_value_sats, self.current_value_sats);
    }
}

/// Percentage change between an initial and current sats value.
///
/// A zero initial value yields zero rather than a division error.
pub fn change_percent(initial_sats: u64, current_sats: u64) -> Decimal {
    if initial_sats == 0 {
        return Decimal::ZERO;
    }
    let initial = Decimal::from(initial_sats);
    let current = Decimal::from(current_sats);
    (current - initial) / initial * Decimal::ONE_HUNDRED
}

/// Input model for entering a new position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub initial_value_sats: u64,
    pub token_amount: u64,
    /// Derived from value and token amount when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_token_sats: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub position_type: PositionType,
}

impl NewPosition {
    /// Validates the new position data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Position name cannot be empty".to_string(),
            )));
        }
        if self.initial_value_sats == 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Position value must be greater than zero".to_string(),
            )));
        }
        if self.token_amount == 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Token amount must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }

    /// Price per token, derived from the entry value when not supplied.
    pub fn effective_price_per_token(&self) -> u64 {
        self.price_per_token_sats
            .unwrap_or(self.initial_value_sats / self.token_amount)
    }
}
