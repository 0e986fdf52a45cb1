//! CoinGecko price provider.
//!
//! Fetches the Bitcoin spot price from the public CoinGecko simple-price
//! endpoint. The endpoint is unauthenticated; the free tier rate limit is
//! generous enough for one request per cache window.
//! API documentation: https://www.coingecko.com/en/api/documentation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::PriceFeedError;
use crate::provider::BitcoinPriceProvider;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from /simple/price?ids=bitcoin&vs_currencies=usd
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<CurrencyPrices>,
}

#[derive(Debug, Deserialize)]
struct CurrencyPrices {
    usd: Option<Decimal>,
}

/// CoinGecko spot price provider.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Create a provider against a custom base URL (used in tests).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BitcoinPriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_price(&self) -> Result<Decimal, PriceFeedError> {
        let url = format!("{}/simple/price", self.base_url);

        debug!("CoinGecko price request");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", "bitcoin"), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PriceFeedError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    PriceFeedError::Network {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(PriceFeedError::Network {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: SimplePriceResponse =
            response
                .json()
                .await
                .map_err(|e| PriceFeedError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        body.bitcoin
            .and_then(|prices| prices.usd)
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .ok_or_else(|| PriceFeedError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: "missing bitcoin.usd field".to_string(),
            })
    }
}
