//! Core error types for the OVT fund.
//!
//! This module defines the root error enum shared by all services. Module
//! error enums (governance, fund, price feed) are wrapped here so callers
//! can hold a single `Result` type at the service boundary.

use thiserror::Error;

use crate::fund::FundError;
use crate::governance::GovernanceError;
use ovt_market_data::PriceFeedError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the fund application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Price feed error: {0}")]
    PriceFeed(#[from] PriceFeedError),

    #[error("Governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("Fund operation failed: {0}")]
    Fund(#[from] FundError),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
