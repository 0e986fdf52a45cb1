//! NAV snapshot model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{format_value, CurrencyMode};
use crate::positions::Position;

/// Aggregate value of the fund at a point in time.
///
/// Snapshots are derived on each poll tick and live only in memory; nothing
/// here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSnapshot {
    /// Sum of current position values in sats.
    pub total_value_sats: u64,
    /// Percentage change of current total over initial total.
    pub change_percent: Decimal,
    /// BTC/USD rate used for display, when one was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btc_price_usd: Option<Decimal>,
    pub as_of: DateTime<Utc>,
    pub positions: Vec<Position>,
}

impl NavSnapshot {
    /// Total value formatted for display in the requested currency.
    pub fn formatted_total(&self, mode: CurrencyMode) -> String {
        format_value(self.total_value_sats, mode, self.btc_price_usd)
    }
}
