//! Unit tests for the governance service and quorum verification.

use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::events::MockEventSink;

fn five_admins() -> Arc<StaticAdminRegistry> {
    Arc::new(StaticAdminRegistry::new(
        (1..=5).map(|i| format!("admin-{}", i)).collect(),
    ))
}

fn service() -> (GovernanceService, MockEventSink) {
    let sink = MockEventSink::new();
    let service = GovernanceService::new(five_admins(), Arc::new(sink.clone()));
    (service, sink)
}

#[tokio::test]
async fn propose_sign_execute_flow() {
    let (service, sink) = service();

    let action = service
        .propose(
            ActionKind::MintTokens,
            "Mint 1M OVT".to_string(),
            json!({ "amount": 1_000_000 }),
        )
        .unwrap();

    for i in 1..=3 {
        service
            .sign(&action.id, &format!("admin-{}", i), "sig")
            .unwrap();
    }
    let (state, pending) = service.status(&action.id).unwrap();
    assert_eq!(state, ApprovalState::Ready);
    assert_eq!(pending.signatures.len(), 3);

    let executed = service
        .execute(&action.id, |sigs| async move { Ok(sigs.len()) })
        .await
        .unwrap();
    assert_eq!(executed, 3);

    // Completed sessions are dropped.
    assert!(service.status(&action.id).is_err());
    assert!(!sink.is_empty());
}

#[tokio::test]
async fn execute_without_quorum_keeps_the_session() {
    let (service, _sink) = service();

    let action = service
        .propose(ActionKind::BurnTokens, "Burn".to_string(), json!({}))
        .unwrap();
    service.sign(&action.id, "admin-1", "sig").unwrap();

    let result: crate::errors::Result<()> = service
        .execute(&action.id, |_sigs| async move { Ok(()) })
        .await;
    assert!(result.is_err());

    // Still signable after the failed execute.
    let (state, _) = service.status(&action.id).unwrap();
    assert_eq!(state, ApprovalState::Collecting);
}

#[test]
fn cancel_discards_the_action() {
    let (service, _sink) = service();

    let action = service
        .propose(ActionKind::AddPosition, "Enter".to_string(), json!({}))
        .unwrap();
    service.sign(&action.id, "admin-1", "sig").unwrap();

    service.cancel(&action.id).unwrap();
    assert!(service.status(&action.id).is_err());
    assert!(service.sign(&action.id, "admin-2", "sig").is_err());
}

#[test]
fn unknown_action_errors() {
    let (service, _sink) = service();
    assert!(service.sign("missing", "admin-1", "sig").is_err());
    assert!(service.status("missing").is_err());
}

#[test]
fn verify_quorum_enforces_registry_size() {
    let four_admins = StaticAdminRegistry::new(
        (1..=4).map(|i| format!("admin-{}", i)).collect(),
    );
    let digest = [0u8; 32];
    let signatures: Vec<AdminSignature> = (1..=3)
        .map(|i| AdminSignature {
            address: format!("admin-{}", i),
            signature: "sig".to_string(),
        })
        .collect();

    assert!(four_admins.verify_quorum(&digest, &signatures).is_err());
}

#[test]
fn verify_quorum_requires_three_distinct_valid_signers() {
    let registry = five_admins();
    let digest = [0u8; 32];

    let two: Vec<AdminSignature> = (1..=2)
        .map(|i| AdminSignature {
            address: format!("admin-{}", i),
            signature: "sig".to_string(),
        })
        .collect();
    assert!(registry.verify_quorum(&digest, &two).is_err());

    let mut duplicated = two.clone();
    duplicated.push(AdminSignature {
        address: "admin-1".to_string(),
        signature: "another".to_string(),
    });
    assert!(registry.verify_quorum(&digest, &duplicated).is_err());

    let three: Vec<AdminSignature> = (1..=3)
        .map(|i| AdminSignature {
            address: format!("admin-{}", i),
            signature: "sig".to_string(),
        })
        .collect();
    assert!(registry.verify_quorum(&digest, &three).is_ok());
}
