//! Error types for the Bitcoin price feed.

use thiserror::Error;

/// Errors produced while fetching or serving the Bitcoin price.
#[derive(Error, Debug)]
pub enum PriceFeedError {
    /// The provider request failed at the network level.
    #[error("Price request to {provider} failed: {message}")]
    Network { provider: String, message: String },

    /// The provider did not answer within the configured timeout.
    #[error("Price request to {provider} timed out")]
    Timeout { provider: String },

    /// The provider answered with a payload we could not interpret.
    #[error("Unexpected response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Every configured provider failed and no cached price exists.
    #[error("No Bitcoin price available: all providers failed and the cache is empty")]
    Unavailable,
}
