//! Multisig approval workflow for admin actions.
//!
//! Admin mutations (minting, burning, entering positions) require a quorum
//! of admin signatures before they execute. Verification sits behind the
//! `AdminVerifier` trait so the shipped in-memory registry can be swapped
//! for real on-chain key verification without touching the state machine.

pub mod admin_registry;
pub mod approval;
pub mod governance_constants;
pub mod governance_errors;
pub mod governance_model;
pub mod governance_service;
pub mod governance_traits;

pub use admin_registry::StaticAdminRegistry;
pub use approval::{ApprovalSession, ApprovalState};
pub use governance_constants::{ADMIN_REGISTRY_SIZE, REQUIRED_SIGNATURES};
pub use governance_errors::GovernanceError;
pub use governance_model::{ActionKind, AdminSignature, PendingAction};
pub use governance_service::GovernanceService;
pub use governance_traits::AdminVerifier;

#[cfg(test)]
mod governance_service_tests;
