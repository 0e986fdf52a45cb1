use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use ovt_core::transactions::{Transaction, TransactionKind, TransactionStatus};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Deserialize, Default)]
struct TransactionsQuery {
    kind: Option<TransactionKind>,
    status: Option<TransactionStatus>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionsQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(
        state
            .transaction_service
            .list_transactions(query.kind, query.status)?,
    ))
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(txid): Path<String>,
) -> ApiResult<Json<Transaction>> {
    Ok(Json(state.transaction_service.get_transaction(&txid)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/{txid}", get(get_transaction))
}
