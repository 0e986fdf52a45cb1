use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use ovt_core::positions::Position;

use crate::error::ApiResult;
use crate::AppState;

async fn list_positions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Position>>> {
    Ok(Json(state.position_service.get_positions()?))
}

async fn get_position(
    State(state): State<Arc<AppState>>,
    Path(position_id): Path<String>,
) -> ApiResult<Json<Position>> {
    Ok(Json(state.position_service.get_position(&position_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/positions", get(list_positions))
        .route("/positions/{id}", get(get_position))
}
