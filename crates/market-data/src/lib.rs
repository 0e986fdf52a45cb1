//! OVT Market Data - Bitcoin price feed.
//!
//! This crate provides the Bitcoin spot price used to value the fund in USD.
//! It defines the `BitcoinPriceProvider` trait, implementations for the
//! CoinGecko and Mempool public APIs, and `BitcoinPriceService`, which caches
//! the price and degrades to the last known value when every source is down.

pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

pub use errors::PriceFeedError;
pub use models::BitcoinPrice;
pub use provider::{BitcoinPriceProvider, CoinGeckoProvider, MempoolProvider};
pub use service::BitcoinPriceService;
