//! OVT Server - REST surface over the fund core.
//!
//! State construction, router assembly, and process lifecycle. The API
//! modules live under `api`; error mapping under `error`.

pub mod api;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use ovt_core::events::{DomainEvent, DomainEventSink};
use ovt_core::fund::{FundMetadata, FundService};
use ovt_core::governance::{GovernanceService, StaticAdminRegistry};
use ovt_core::nav::{NavService, NavServiceTrait, NavSnapshot, NavTracker};
use ovt_core::positions::{
    InMemoryPositionRepository, PositionService, PositionServiceTrait,
};
use ovt_core::settings::AppSettings;
use ovt_core::transactions::{
    InMemoryTransactionLog, TransactionService, TransactionServiceTrait,
};
use ovt_market_data::BitcoinPriceService;

const DEFAULT_PORT: u16 = 3001;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Initial OVT supply minted to the treasury at startup.
const INITIAL_SUPPLY: u64 = 1_000_000;

/// Shared application state handed to every handler.
pub struct AppState {
    pub settings: AppSettings,
    pub nav_service: Arc<dyn NavServiceTrait>,
    pub position_service: Arc<dyn PositionServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub governance: Arc<GovernanceService>,
    pub fund: Arc<FundService>,
    nav_rx: watch::Receiver<Option<NavSnapshot>>,
}

impl AppState {
    /// Latest NAV snapshot published by the tracker, if any.
    pub fn latest_nav(&self) -> Option<NavSnapshot> {
        self.nav_rx.borrow().clone()
    }
}

/// Sink that forwards domain events to the tracing log.
struct LogEventSink;

impl DomainEventSink for LogEventSink {
    fn emit(&self, event: DomainEvent) {
        debug!("domain event: {:?}", event);
    }
}

/// Builds the application state and starts the NAV poll loop.
pub fn build_state(settings: AppSettings) -> (Arc<AppState>, NavTracker) {
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(LogEventSink);

    // The live on-chain ledger client is not wired yet; outside mock mode
    // the repositories simply start empty instead of fixture-seeded.
    let positions_repo = if settings.mock_mode {
        Arc::new(InMemoryPositionRepository::seeded())
    } else {
        Arc::new(InMemoryPositionRepository::new())
    };
    let transaction_log = if settings.mock_mode {
        Arc::new(InMemoryTransactionLog::seeded())
    } else {
        Arc::new(InMemoryTransactionLog::new())
    };

    let transaction_service = Arc::new(TransactionService::new(
        transaction_log,
        event_sink.clone(),
    ));
    let position_service = Arc::new(PositionService::new(
        positions_repo.clone(),
        transaction_service.clone(),
        event_sink.clone(),
    ));

    let verifier = Arc::new(StaticAdminRegistry::new(settings.admin_wallets.clone()));
    let governance = Arc::new(GovernanceService::new(verifier.clone(), event_sink.clone()));

    let fund = Arc::new(FundService::new(
        FundMetadata::new(INITIAL_SUPPLY, settings.treasury_address.clone()),
        verifier,
        positions_repo.clone(),
        transaction_service.clone(),
    ));

    let price_feed = Arc::new(BitcoinPriceService::new());
    let nav_service: Arc<dyn NavServiceTrait> =
        Arc::new(NavService::new(positions_repo, price_feed));

    let tracker = NavTracker::spawn(
        nav_service.clone(),
        event_sink,
        NavTracker::default_interval(),
    );
    let nav_rx = tracker.subscribe();

    let state = Arc::new(AppState {
        settings,
        nav_service,
        position_service,
        transaction_service,
        governance,
        fund,
        nav_rx,
    });

    (state, tracker)
}

/// Assembles the router over the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", crate::api::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

/// Entry point used by `main`.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let settings = AppSettings::from_env()?;
    info!(
        "Starting OVT server (mock_mode={}, program_id={})",
        settings.mock_mode, settings.program_id
    );

    let (state, tracker) = build_state(settings);
    let app = build_router(state);

    let port = std::env::var("OVT_SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracker.shutdown().await;
    Ok(())
}
