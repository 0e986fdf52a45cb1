//! Governance service managing pending actions.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use log::debug;
use serde_json::Value;

use super::approval::{ApprovalSession, ApprovalState};
use super::governance_errors::GovernanceError;
use super::governance_model::{ActionKind, AdminSignature, PendingAction};
use super::governance_traits::AdminVerifier;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

/// Manages the set of actions currently collecting signatures.
///
/// Completed and cancelled actions are dropped, mirroring the dashboard
/// modal: nothing about an approval persists past its session.
pub struct GovernanceService {
    verifier: Arc<dyn AdminVerifier>,
    event_sink: Arc<dyn DomainEventSink>,
    sessions: Mutex<HashMap<String, ApprovalSession>>,
}

impl GovernanceService {
    pub fn new(verifier: Arc<dyn AdminVerifier>, event_sink: Arc<dyn DomainEventSink>) -> Self {
        Self {
            verifier,
            event_sink,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Opens a new approval session and returns the pending action.
    pub fn propose(
        &self,
        kind: ActionKind,
        description: String,
        payload: Value,
    ) -> Result<PendingAction> {
        let session = ApprovalSession::new(kind, description, payload, self.verifier.clone());
        let action = session.action().clone();

        debug!("Proposed {} action {}", kind, action.id);
        self.sessions
            .lock()
            .unwrap()
            .insert(action.id.clone(), session);

        Ok(action)
    }

    /// Records a signature on a pending action.
    pub fn sign(&self, action_id: &str, address: &str, signature: &str) -> Result<ApprovalState> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(action_id)
            .ok_or_else(|| GovernanceError::ActionNotFound(action_id.to_string()))?;
        session.sign(address, signature)
    }

    /// Current state and signature set of a pending action.
    pub fn status(&self, action_id: &str) -> Result<(ApprovalState, PendingAction)> {
        let sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get(action_id)
            .ok_or_else(|| GovernanceError::ActionNotFound(action_id.to_string()))?;
        Ok((session.state(), session.action().clone()))
    }

    /// Cancels a pending action, discarding its signatures.
    pub fn cancel(&self, action_id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut session = sessions
            .remove(action_id)
            .ok_or_else(|| GovernanceError::ActionNotFound(action_id.to_string()))?;
        session.cancel();
        debug!("Cancelled action {}", action_id);
        Ok(())
    }

    /// Executes an approved action through the supplied operation.
    ///
    /// On success the session is dropped and an `ActionExecuted` event is
    /// emitted. On failure - including missing quorum - the session is put
    /// back so signing can continue or the action can be cancelled.
    pub async fn execute<T, F, Fut>(&self, action_id: &str, operation: F) -> Result<T>
    where
        F: FnOnce(Vec<AdminSignature>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut session = self
            .sessions
            .lock()
            .unwrap()
            .remove(action_id)
            .ok_or_else(|| GovernanceError::ActionNotFound(action_id.to_string()))?;

        let kind = session.action().kind;
        match session.execute(operation).await {
            Ok(value) => {
                self.event_sink.emit(DomainEvent::action_executed(
                    action_id.to_string(),
                    kind.to_string(),
                ));
                Ok(value)
            }
            Err(err) => {
                self.sessions
                    .lock()
                    .unwrap()
                    .insert(action_id.to_string(), session);
                Err(err)
            }
        }
    }
}
