//! Admin verification trait.

use super::governance_constants::{ADMIN_REGISTRY_SIZE, REQUIRED_SIGNATURES};
use super::governance_errors::GovernanceError;
use super::governance_model::AdminSignature;
use crate::errors::Result;

/// Verifies admin membership and signatures for governance actions.
///
/// The approval state machine and fund services only talk to this trait.
/// Implementations decide what a signature actually is: the in-memory
/// registry ships a stand-in check, a production implementation verifies
/// ECDSA signatures over the action digest against known public keys.
pub trait AdminVerifier: Send + Sync {
    /// Whether the address belongs to the admin registry.
    fn is_admin(&self, address: &str) -> bool;

    /// Number of registered admins.
    fn admin_count(&self) -> usize;

    /// Verify one signature over the given action digest.
    fn verify_signature(&self, digest: &[u8; 32], signature: &AdminSignature) -> Result<bool>;

    /// Verify a complete quorum for an action.
    ///
    /// Requires the registry to hold exactly the expected number of admin
    /// keys, and at least the required number of valid signatures from
    /// distinct registered admins. Duplicate signers count once.
    fn verify_quorum(&self, digest: &[u8; 32], signatures: &[AdminSignature]) -> Result<()> {
        if self.admin_count() != ADMIN_REGISTRY_SIZE {
            return Err(GovernanceError::InvalidRegistry {
                actual: self.admin_count(),
            }
            .into());
        }

        let mut seen: Vec<&str> = Vec::new();
        for signature in signatures {
            if seen.contains(&signature.address.as_str()) {
                continue;
            }
            if !self.is_admin(&signature.address) {
                continue;
            }
            if self.verify_signature(digest, signature)? {
                seen.push(&signature.address);
            }
        }

        if seen.len() < REQUIRED_SIGNATURES {
            return Err(GovernanceError::QuorumNotReached { have: seen.len() }.into());
        }

        Ok(())
    }
}
