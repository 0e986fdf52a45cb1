//! Price feed models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A Bitcoin spot price observation in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinPrice {
    /// USD per whole bitcoin.
    pub usd: Decimal,
    /// When the observation was taken.
    pub fetched_at: DateTime<Utc>,
}

impl BitcoinPrice {
    pub fn new(usd: Decimal, fetched_at: DateTime<Utc>) -> Self {
        Self { usd, fetched_at }
    }

    /// Age of the observation relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.fetched_at
    }
}
