//! Fund domain models.

use serde::{Deserialize, Serialize};

/// On-ledger metadata of the OVT token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundMetadata {
    /// Total OVT supply in base units.
    pub total_supply: u64,
    /// Net asset value backing the supply, in sats.
    pub nav_sats: u64,
    /// Address of the treasury holding the fund's Bitcoin.
    pub treasury_address: String,
}

impl FundMetadata {
    pub fn new(initial_supply: u64, treasury_address: String) -> Self {
        Self {
            total_supply: initial_supply,
            nav_sats: 0,
            treasury_address,
        }
    }

    /// Price of one OVT base unit in sats.
    ///
    /// Returns `None` while the supply is zero.
    pub fn price_per_token_sats(&self) -> Option<u64> {
        self.nav_sats.checked_div(self.total_supply)
    }
}
