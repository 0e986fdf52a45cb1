//! Unit tests for the position service.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::*;
use crate::events::MockEventSink;
use crate::transactions::{
    InMemoryTransactionLog, TransactionKind, TransactionService, TransactionServiceTrait,
};

struct Fixture {
    service: PositionService,
    transactions: Arc<TransactionService>,
    sink: MockEventSink,
}

fn fixture() -> Fixture {
    let sink = MockEventSink::new();
    let transactions = Arc::new(TransactionService::new(
        Arc::new(InMemoryTransactionLog::new()),
        Arc::new(sink.clone()),
    ));
    let service = PositionService::new(
        Arc::new(InMemoryPositionRepository::new()),
        transactions.clone(),
        Arc::new(sink.clone()),
    );
    Fixture {
        service,
        transactions,
        sink,
    }
}

fn sample_position(name: &str) -> NewPosition {
    NewPosition {
        name: name.to_string(),
        description: "Seed round".to_string(),
        initial_value_sats: 100_000_000,
        token_amount: 1_000_000,
        price_per_token_sats: None,
        transaction_id: None,
        address: None,
        position_type: PositionType::PostTge,
    }
}

#[tokio::test]
async fn added_position_starts_at_entry_value() {
    let f = fixture();

    let added = f.service.add_position(sample_position("Alpha")).await.unwrap();

    assert_eq!(added.current_value_sats, added.initial_value_sats);
    assert_eq!(added.change_percent, Decimal::ZERO);
    assert_eq!(added.status, PositionStatus::Active);

    let listed = f.service.get_positions().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, added.id);
}

#[tokio::test]
async fn add_position_records_entry_transaction() {
    let f = fixture();

    f.service.add_position(sample_position("Alpha")).await.unwrap();

    let entries = f
        .transactions
        .list_transactions(Some(TransactionKind::PositionEntry), None)
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount_sats, 100_000_000);
    assert!(!f.sink.is_empty());
}

#[tokio::test]
async fn add_position_rejects_invalid_input() {
    let f = fixture();

    let mut invalid = sample_position("");
    invalid.name = String::new();
    assert!(f.service.add_position(invalid).await.is_err());
    assert!(f.service.get_positions().unwrap().is_empty());
}

#[tokio::test]
async fn exit_position_marks_exited_and_records_transaction() {
    let f = fixture();
    let added = f.service.add_position(sample_position("Alpha")).await.unwrap();

    let exited = f.service.exit_position(&added.id).await.unwrap();
    assert_eq!(exited.status, PositionStatus::Exited);

    let exits = f
        .transactions
        .list_transactions(Some(TransactionKind::PositionExit), None)
        .unwrap();
    assert_eq!(exits.len(), 1);

    // Exited positions are skipped by revaluation.
    let revalued = f.service.revalue_all(Some(1)).await.unwrap();
    assert!(revalued.is_empty());
}

#[tokio::test]
async fn revalue_all_moves_values_within_bounds() {
    let f = fixture();
    f.service.add_position(sample_position("Alpha")).await.unwrap();
    f.service.add_position(sample_position("Beta")).await.unwrap();

    let revalued = f.service.revalue_all(Some(7)).await.unwrap();
    assert_eq!(revalued.len(), 2);

    for position in &revalued {
        let initial = position.initial_value_sats as f64;
        let current = position.current_value_sats as f64;
        assert!(current >= initial * 0.95 - 1.0);
        assert!(current <= initial * 1.05 + 1.0);
    }
}

#[tokio::test]
async fn revalue_all_is_reproducible_with_a_seed() {
    let a = fixture();
    let b = fixture();
    a.service.add_position(sample_position("Alpha")).await.unwrap();
    b.service.add_position(sample_position("Alpha")).await.unwrap();

    let first = a.service.revalue_all(Some(42)).await.unwrap();
    let second = b.service.revalue_all(Some(42)).await.unwrap();

    assert_eq!(
        first[0].current_value_sats,
        second[0].current_value_sats
    );
}

#[test]
fn seeded_repository_parses_fixture() {
    let repository = InMemoryPositionRepository::seeded();
    let positions = repository.list().unwrap();
    assert!(!positions.is_empty());
}
