//! Approval session state machine.

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::governance_constants::{ADMIN_REGISTRY_SIZE, REQUIRED_SIGNATURES};
use super::governance_errors::GovernanceError;
use super::governance_model::{ActionKind, AdminSignature, PendingAction};
use super::governance_traits::AdminVerifier;
use crate::errors::Result;

/// State of an approval session.
///
/// `Collecting → Ready` happens automatically at quorum; `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    Collecting,
    Ready,
    Completed,
    Cancelled,
}

impl ApprovalState {
    fn is_terminal(self) -> bool {
        matches!(self, ApprovalState::Completed | ApprovalState::Cancelled)
    }
}

/// A pending action together with its collection state.
pub struct ApprovalSession {
    action: PendingAction,
    state: ApprovalState,
    verifier: Arc<dyn AdminVerifier>,
}

impl ApprovalSession {
    pub fn new(
        kind: ActionKind,
        description: String,
        payload: Value,
        verifier: Arc<dyn AdminVerifier>,
    ) -> Self {
        Self {
            action: PendingAction::new(kind, description, payload),
            state: ApprovalState::Collecting,
            verifier,
        }
    }

    pub fn action(&self) -> &PendingAction {
        &self.action
    }

    pub fn state(&self) -> ApprovalState {
        self.state
    }

    pub fn signature_count(&self) -> usize {
        self.action.signatures.len()
    }

    /// Records one admin signature.
    ///
    /// Signing twice from the same address is a no-op; the signature count
    /// only grows for first-time signers. The session flips to `Ready` once
    /// the quorum is met and keeps accepting signatures up to the registry
    /// size.
    pub fn sign(&mut self, address: &str, signature: &str) -> Result<ApprovalState> {
        if self.state.is_terminal() {
            return Err(GovernanceError::SessionClosed {
                state: format!("{:?}", self.state),
            }
            .into());
        }

        if !self.verifier.is_admin(address) {
            return Err(GovernanceError::NotAnAdmin(address.to_string()).into());
        }

        if self.action.has_signed(address) {
            debug!("Address {} already signed action {}", address, self.action.id);
            return Ok(self.state);
        }

        if self.action.signatures.len() >= ADMIN_REGISTRY_SIZE {
            return Err(GovernanceError::SignatureCapReached.into());
        }

        let admin_signature = AdminSignature {
            address: address.to_string(),
            signature: signature.to_string(),
        };
        if !self
            .verifier
            .verify_signature(&self.action.digest(), &admin_signature)?
        {
            return Err(GovernanceError::InvalidSignature {
                address: address.to_string(),
            }
            .into());
        }

        self.action.signatures.push(admin_signature);
        if self.action.signatures.len() >= REQUIRED_SIGNATURES {
            self.state = ApprovalState::Ready;
        }

        Ok(self.state)
    }

    /// Executes the approved action through the supplied operation.
    ///
    /// Requires quorum. The operation receives the collected signatures; an
    /// operation error propagates to the caller and leaves the session in
    /// `Ready` so it can be retried or cancelled.
    pub async fn execute<T, F, Fut>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce(Vec<AdminSignature>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.state != ApprovalState::Ready {
            return Err(GovernanceError::QuorumNotReached {
                have: self.action.signatures.len(),
            }
            .into());
        }

        let value = operation(self.action.signatures.clone()).await?;
        self.state = ApprovalState::Completed;
        Ok(value)
    }

    /// Cancels the session, discarding every collected signature.
    pub fn cancel(&mut self) {
        self.action.signatures.clear();
        self.state = ApprovalState::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::StaticAdminRegistry;

    fn five_admins() -> Arc<StaticAdminRegistry> {
        Arc::new(StaticAdminRegistry::new(
            (1..=5).map(|i| format!("admin-{}", i)).collect(),
        ))
    }

    fn session() -> ApprovalSession {
        ApprovalSession::new(
            ActionKind::MintTokens,
            "Mint 1M OVT".to_string(),
            serde_json::json!({ "amount": 1_000_000 }),
            five_admins(),
        )
    }

    #[test]
    fn duplicate_signer_does_not_grow_signatures() {
        let mut session = session();

        session.sign("admin-1", "sig-a").unwrap();
        session.sign("admin-1", "sig-b").unwrap();

        assert_eq!(session.signature_count(), 1);
        assert_eq!(session.state(), ApprovalState::Collecting);
    }

    #[test]
    fn quorum_of_three_reaches_ready_two_does_not() {
        let mut session = session();

        session.sign("admin-1", "sig").unwrap();
        session.sign("admin-2", "sig").unwrap();
        assert_eq!(session.state(), ApprovalState::Collecting);

        session.sign("admin-3", "sig").unwrap();
        assert_eq!(session.state(), ApprovalState::Ready);
    }

    #[test]
    fn unknown_address_cannot_sign() {
        let mut session = session();
        let result = session.sign("stranger", "sig");
        assert!(result.is_err());
        assert_eq!(session.signature_count(), 0);
    }

    #[test]
    fn cancel_discards_signatures() {
        let mut session = session();
        session.sign("admin-1", "sig").unwrap();
        session.cancel();

        assert_eq!(session.state(), ApprovalState::Cancelled);
        assert_eq!(session.signature_count(), 0);
        assert!(session.sign("admin-2", "sig").is_err());
    }

    #[tokio::test]
    async fn execute_requires_quorum() {
        let mut session = session();
        session.sign("admin-1", "sig").unwrap();

        let result: Result<()> = session
            .execute(|_sigs| async move { Ok(()) })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn execute_passes_signatures_and_completes() {
        let mut session = session();
        for i in 1..=3 {
            session.sign(&format!("admin-{}", i), "sig").unwrap();
        }

        let count = session
            .execute(|sigs| async move { Ok(sigs.len()) })
            .await
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(session.state(), ApprovalState::Completed);
    }

    #[tokio::test]
    async fn execute_error_propagates_and_session_stays_ready() {
        let mut session = session();
        for i in 1..=3 {
            session.sign(&format!("admin-{}", i), "sig").unwrap();
        }

        let result: Result<()> = session
            .execute(|_sigs| async move {
                Err(crate::errors::Error::Unexpected("settlement failed".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(session.state(), ApprovalState::Ready);
    }

    #[test]
    fn signatures_keep_accumulating_after_ready_up_to_cap() {
        let mut session = session();
        for i in 1..=5 {
            session.sign(&format!("admin-{}", i), "sig").unwrap();
        }
        assert_eq!(session.signature_count(), 5);
        assert_eq!(session.state(), ApprovalState::Ready);
    }
}
