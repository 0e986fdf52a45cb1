//! Governance error types.

use thiserror::Error;

use super::governance_constants::{ADMIN_REGISTRY_SIZE, REQUIRED_SIGNATURES};

/// Errors raised by the multisig approval workflow.
#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Address {0} is not a registered admin")]
    NotAnAdmin(String),

    #[error("Signature from {address} failed verification")]
    InvalidSignature { address: String },

    #[error("Action already carries the maximum of {} signatures", ADMIN_REGISTRY_SIZE)]
    SignatureCapReached,

    #[error("Quorum not reached: {have} of {} required signatures", REQUIRED_SIGNATURES)]
    QuorumNotReached { have: usize },

    #[error("Admin registry must hold exactly {} keys, found {actual}", ADMIN_REGISTRY_SIZE)]
    InvalidRegistry { actual: usize },

    #[error("Approval session is closed ({state})")]
    SessionClosed { state: String },

    #[error("Pending action {0} not found")]
    ActionNotFound(String),
}
