//! Governance domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Kind of admin action awaiting approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    MintTokens,
    BurnTokens,
    AddPosition,
    ExitPosition,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::MintTokens => "mint_tokens",
            ActionKind::BurnTokens => "burn_tokens",
            ActionKind::AddPosition => "add_position",
            ActionKind::ExitPosition => "exit_position",
        };
        f.write_str(name)
    }
}

/// One admin's signature over a pending action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignature {
    pub address: String,
    pub signature: String,
}

/// An admin action collecting signatures before execution.
///
/// Discarded on cancellation or successful completion; signatures never
/// survive the action they were collected for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub id: String,
    pub kind: ActionKind,
    pub description: String,
    pub payload: Value,
    pub signatures: Vec<AdminSignature>,
    pub created_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(kind: ActionKind, description: String, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            description,
            payload,
            signatures: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Canonical digest admins sign.
    ///
    /// SHA-256 over the JSON encoding of kind, description, and payload.
    /// serde_json orders object keys, so the encoding is stable across
    /// processes.
    pub fn digest(&self) -> [u8; 32] {
        let message = json!({
            "description": self.description,
            "kind": self.kind,
            "payload": self.payload,
        });
        let encoded = serde_json::to_vec(&message).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hasher.finalize().into()
    }

    /// Hex encoding of the digest, the form presented to signing wallets.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    /// Whether this address has already signed.
    pub fn has_signed(&self, address: &str) -> bool {
        self.signatures.iter().any(|s| s.address == address)
    }
}
