//! In-memory admin registry.

use super::governance_model::AdminSignature;
use super::governance_traits::AdminVerifier;
use crate::errors::Result;

/// Admin registry backed by a fixed address list.
///
/// The signature check is a stand-in: a signature is accepted when it is
/// non-empty and its address is registered. A production registry holds the
/// admins' public keys and verifies real ECDSA signatures over the action
/// digest; everything above this trait is unchanged by that swap.
pub struct StaticAdminRegistry {
    admins: Vec<String>,
}

impl StaticAdminRegistry {
    pub fn new(admins: Vec<String>) -> Self {
        Self { admins }
    }
}

impl AdminVerifier for StaticAdminRegistry {
    fn is_admin(&self, address: &str) -> bool {
        self.admins.iter().any(|a| a == address)
    }

    fn admin_count(&self) -> usize {
        self.admins.len()
    }

    fn verify_signature(&self, _digest: &[u8; 32], signature: &AdminSignature) -> Result<bool> {
        Ok(!signature.signature.trim().is_empty() && self.is_admin(&signature.address))
    }
}
