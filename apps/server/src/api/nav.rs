use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use ovt_core::currency::CurrencyMode;
use ovt_core::nav::NavSnapshot;
use ovt_core::positions::Position;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavResponse {
    total_value_sats: u64,
    change_percent: Decimal,
    formatted_total_btc: String,
    formatted_total_usd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    btc_price_usd: Option<Decimal>,
    as_of: DateTime<Utc>,
    positions: Vec<Position>,
}

impl From<NavSnapshot> for NavResponse {
    fn from(snapshot: NavSnapshot) -> Self {
        Self {
            total_value_sats: snapshot.total_value_sats,
            change_percent: snapshot.change_percent,
            formatted_total_btc: snapshot.formatted_total(CurrencyMode::Btc),
            formatted_total_usd: snapshot.formatted_total(CurrencyMode::Usd),
            btc_price_usd: snapshot.btc_price_usd,
            as_of: snapshot.as_of,
            positions: snapshot.positions,
        }
    }
}

async fn get_nav(State(state): State<Arc<AppState>>) -> ApiResult<Json<NavResponse>> {
    // Serve the tracker's snapshot when one exists; compute on demand while
    // the first poll tick is still pending.
    let snapshot = match state.latest_nav() {
        Some(snapshot) => snapshot,
        None => state.nav_service.current_nav().await?,
    };
    Ok(Json(snapshot.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/get_nav", get(get_nav))
}
