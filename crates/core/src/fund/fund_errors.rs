//! Fund error types.

use thiserror::Error;

/// Errors raised by fund supply operations.
#[derive(Error, Debug)]
pub enum FundError {
    #[error("Arithmetic overflow in supply accounting")]
    ArithmeticOverflow,

    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientFunds { available: u64, requested: u64 },

    #[error("Token supply is zero; no price can be derived")]
    ZeroSupply,

    #[error("Payment proof is empty or malformed")]
    InvalidPaymentProof,
}
