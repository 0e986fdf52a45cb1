//! Unit tests for NAV aggregation and the poll loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, Result};
use crate::events::MockEventSink;
use crate::positions::{
    InMemoryPositionRepository, Position, PositionRepositoryTrait, PositionStatus, PositionType,
};
use async_trait::async_trait;
use ovt_market_data::BitcoinPriceService;

fn position(id: &str, initial: u64, current: u64) -> Position {
    let mut position = Position {
        id: id.to_string(),
        name: format!("Position {}", id),
        description: String::new(),
        initial_value_sats: initial,
        current_value_sats: current,
        change_percent: Decimal::ZERO,
        token_amount: 1_000,
        price_per_token_sats: initial / 1_000,
        transaction_id: None,
        address: None,
        position_type: PositionType::PostTge,
        status: PositionStatus::Active,
        entry_timestamp: Utc::now(),
    };
    position.recompute_change();
    position
}

async fn service_with(positions: Vec<Position>) -> NavService {
    let repository = Arc::new(InMemoryPositionRepository::new());
    for p in positions {
        repository.add(p).await.unwrap();
    }
    // No providers: the feed reports unavailable and the snapshot has no rate.
    let feed = Arc::new(BitcoinPriceService::with_providers(Vec::new()));
    NavService::new(repository, feed)
}

#[tokio::test]
async fn current_nav_sums_position_values() {
    let service = service_with(vec![
        position("a", 100_000_000, 110_000_000),
        position("b", 100_000_000, 90_000_000),
    ])
    .await;

    let snapshot = service.current_nav().await.unwrap();
    assert_eq!(snapshot.total_value_sats, 200_000_000);
    assert_eq!(snapshot.change_percent, Decimal::ZERO);
    assert_eq!(snapshot.positions.len(), 2);
    assert!(snapshot.btc_price_usd.is_none());
}

#[tokio::test]
async fn current_nav_computes_change_percent() {
    let service = service_with(vec![position("a", 100_000_000, 150_000_000)]).await;

    let snapshot = service.current_nav().await.unwrap();
    assert_eq!(snapshot.change_percent, dec!(50));
}

#[tokio::test]
async fn current_nav_on_empty_ledger_is_zero() {
    let service = service_with(Vec::new()).await;

    let snapshot = service.current_nav().await.unwrap();
    assert_eq!(snapshot.total_value_sats, 0);
    assert_eq!(snapshot.change_percent, Decimal::ZERO);
}

/// NAV service that replays a scripted sequence of results.
struct ScriptedNavService {
    responses: Mutex<Vec<Result<NavSnapshot>>>,
}

impl ScriptedNavService {
    fn new(responses: Vec<Result<NavSnapshot>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
        })
    }
}

#[async_trait]
impl NavServiceTrait for ScriptedNavService {
    async fn current_nav(&self) -> Result<NavSnapshot> {
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            match &responses[0] {
                Ok(snapshot) => Ok(snapshot.clone()),
                Err(_) => Err(Error::Unexpected("scripted failure".to_string())),
            }
        }
    }
}

fn snapshot(total: u64) -> NavSnapshot {
    NavSnapshot {
        total_value_sats: total,
        change_percent: Decimal::ZERO,
        btc_price_usd: None,
        as_of: Utc::now(),
        positions: Vec::new(),
    }
}

#[tokio::test]
async fn tracker_publishes_and_retains_last_good_snapshot() {
    let service = ScriptedNavService::new(vec![
        Ok(snapshot(500)),
        Err(Error::Unexpected("scripted failure".to_string())),
    ]);
    let sink = MockEventSink::new();
    let tracker = NavTracker::spawn(
        service,
        Arc::new(sink.clone()),
        Duration::from_millis(10),
    );

    let mut rx = tracker.subscribe();
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("timed out waiting for first snapshot")
        .unwrap();
    assert_eq!(tracker.latest().unwrap().total_value_sats, 500);

    // Let several failing ticks pass; the published snapshot must survive.
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(tracker.latest().unwrap().total_value_sats, 500);
    assert!(!sink.is_empty());

    tracker.shutdown().await;
}

#[tokio::test]
async fn tracker_shutdown_stops_the_loop() {
    let service = ScriptedNavService::new(vec![Ok(snapshot(1))]);
    let tracker = NavTracker::spawn(
        service,
        Arc::new(MockEventSink::new()),
        Duration::from_millis(10),
    );

    tracker.shutdown().await;
}
