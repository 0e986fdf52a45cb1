//! NAV aggregation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::warn;

use super::nav_model::NavSnapshot;
use crate::errors::{Error, Result};
use crate::positions::positions_model::change_percent;
use crate::positions::PositionRepositoryTrait;
use ovt_market_data::BitcoinPriceService;

#[async_trait]
pub trait NavServiceTrait: Send + Sync {
    /// Computes a fresh NAV snapshot from the position ledger.
    async fn current_nav(&self) -> Result<NavSnapshot>;
}

/// Aggregates the position ledger into a NAV snapshot.
///
/// The BTC price ride-along is best-effort: when the feed is down the
/// snapshot still carries valid sats totals, just no USD rate.
pub struct NavService {
    positions: Arc<dyn PositionRepositoryTrait>,
    price_feed: Arc<BitcoinPriceService>,
}

impl NavService {
    pub fn new(
        positions: Arc<dyn PositionRepositoryTrait>,
        price_feed: Arc<BitcoinPriceService>,
    ) -> Self {
        Self {
            positions,
            price_feed,
        }
    }
}

#[async_trait]
impl NavServiceTrait for NavService {
    async fn current_nav(&self) -> Result<NavSnapshot> {
        let positions = self.positions.list()?;

        let mut total_initial: u64 = 0;
        let mut total_current: u64 = 0;
        for position in &positions {
            total_initial = total_initial
                .checked_add(position.initial_value_sats)
                .ok_or_else(|| Error::Unexpected("NAV initial total overflow".to_string()))?;
            total_current = total_current
                .checked_add(position.current_value_sats)
                .ok_or_else(|| Error::Unexpected("NAV current total overflow".to_string()))?;
        }

        let btc_price_usd = match self.price_feed.get_price().await {
            Ok(price) => Some(price.usd),
            Err(err) => {
                warn!("BTC price unavailable for NAV snapshot: {}", err);
                None
            }
        };

        Ok(NavSnapshot {
            total_value_sats: total_current,
            change_percent: change_percent(total_initial, total_current),
            btc_price_usd,
            as_of: Utc::now(),
            positions,
        })
    }
}
