//! Cached Bitcoin price service.
//!
//! Wraps a set of `BitcoinPriceProvider`s behind a short-lived cache. The
//! serving policy favors availability over freshness: when every provider
//! fails but a previous observation exists, the stale observation is served
//! instead of an error.

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::PriceFeedError;
use crate::models::BitcoinPrice;
use crate::provider::BitcoinPriceProvider;

/// How long a fetched price stays fresh.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60;

/// Caching facade over one or more Bitcoin price providers.
///
/// All providers are queried concurrently on a cache miss and the successful
/// responses are averaged. The cache is process-wide: clone the service (or
/// share it behind an `Arc`) rather than constructing one per caller.
pub struct BitcoinPriceService {
    providers: Vec<Arc<dyn BitcoinPriceProvider>>,
    cache: RwLock<Option<BitcoinPrice>>,
    ttl: Duration,
}

impl BitcoinPriceService {
    /// Create a service with the default provider set and cache TTL.
    pub fn new() -> Self {
        Self::with_providers(vec![
            Arc::new(crate::provider::CoinGeckoProvider::new()),
            Arc::new(crate::provider::MempoolProvider::new()),
        ])
    }

    /// Create a service over an explicit provider set.
    pub fn with_providers(providers: Vec<Arc<dyn BitcoinPriceProvider>>) -> Self {
        Self {
            providers,
            cache: RwLock::new(None),
            ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Override the cache TTL (used in tests).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current Bitcoin price in USD.
    ///
    /// Returns the cached observation while it is fresh. On a miss, refreshes
    /// from all providers; if every provider fails, falls back to the stale
    /// cache when one exists and errors only when there is nothing to serve.
    pub async fn get_price(&self) -> Result<BitcoinPrice, PriceFeedError> {
        let now = Utc::now();

        if let Some(cached) = *self.cache.read().await {
            if cached.age(now) <= self.ttl {
                debug!("Serving cached Bitcoin price: {}", cached.usd);
                return Ok(cached);
            }
        }

        match self.refresh().await {
            Ok(price) => Ok(price),
            Err(err) => {
                if let Some(stale) = *self.cache.read().await {
                    warn!(
                        "All price providers failed ({}); serving stale price from {}",
                        err, stale.fetched_at
                    );
                    Ok(stale)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Last observation, fresh or stale, without touching the network.
    pub async fn last_known(&self) -> Option<BitcoinPrice> {
        *self.cache.read().await
    }

    async fn refresh(&self) -> Result<BitcoinPrice, PriceFeedError> {
        let results = join_all(self.providers.iter().map(|p| p.fetch_price())).await;

        let mut prices = Vec::with_capacity(self.providers.len());
        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(price) => prices.push(price),
                Err(err) => warn!("Price provider {} failed: {}", provider.id(), err),
            }
        }

        if prices.is_empty() {
            return Err(PriceFeedError::Unavailable);
        }

        let sum: Decimal = prices.iter().sum();
        let average = sum / Decimal::from(prices.len() as u64);
        let observation = BitcoinPrice::new(average, Utc::now());

        *self.cache.write().await = Some(observation);
        debug!(
            "Refreshed Bitcoin price: {} (from {} source(s))",
            observation.usd,
            prices.len()
        );

        Ok(observation)
    }
}

impl Default for BitcoinPriceService {
    fn default() -> Self {
        Self::new()
    }
}
