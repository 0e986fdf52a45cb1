//! REST API modules.

use std::sync::Arc;

use axum::Router;

use crate::AppState;

mod fund;
mod governance;
mod health;
mod nav;
mod positions;
mod transactions;

/// Composes the full API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(nav::router())
        .merge(positions::router())
        .merge(transactions::router())
        .merge(fund::router())
        .merge(governance::router())
}
