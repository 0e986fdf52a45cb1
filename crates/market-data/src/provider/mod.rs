//! Bitcoin price provider trait and implementations.

mod coingecko;
mod mempool;

pub use coingecko::CoinGeckoProvider;
pub use mempool::MempoolProvider;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::PriceFeedError;

/// A source of the current Bitcoin spot price in USD.
///
/// Implement this trait to add a new price source. `BitcoinPriceService`
/// queries all registered providers concurrently and averages whichever
/// succeed, so a provider should fail fast rather than retry internally.
#[async_trait]
pub trait BitcoinPriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current USD price of one bitcoin.
    async fn fetch_price(&self) -> Result<Decimal, PriceFeedError>;
}
