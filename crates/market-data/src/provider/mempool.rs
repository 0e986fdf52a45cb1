//! Mempool.space price provider.
//!
//! Fetches the Bitcoin spot price from the public mempool.space prices
//! endpoint, which reports exchange-averaged fiat prices alongside a
//! timestamp. Unauthenticated.
//! API documentation: https://mempool.space/docs/api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::PriceFeedError;
use crate::provider::BitcoinPriceProvider;

const BASE_URL: &str = "https://mempool.space";
const PROVIDER_ID: &str = "MEMPOOL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from /api/v1/prices
#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct PricesResponse {
    usd: Option<Decimal>,
    // Note: time plus EUR/GBP/CAD/CHF/AUD/JPY fields exist but are not used
}

/// Mempool.space spot price provider.
pub struct MempoolProvider {
    client: Client,
    base_url: String,
}

impl MempoolProvider {
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

impl Default for MempoolProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BitcoinPriceProvider for MempoolProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_price(&self) -> Result<Decimal, PriceFeedError> {
        let url = format!("{}/api/v1/prices", self.base_url);

        debug!("Mempool price request");

        let response = self.client.get(&url).send().await.map_err(|e| {
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

        let body: PricesResponse =
            response
                .json()
                .await
                .map_err(|e| PriceFeedError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        body.usd
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .ok_or_else(|| PriceFeedError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: "missing USD field".to_string(),
            })
    }
}
