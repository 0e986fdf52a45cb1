use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ovt_core::transactions::Transaction;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuyRequest {
    buyer_address: String,
    ovt_amount: u64,
    /// Opaque payment proof; simulated on testnet.
    #[serde(default)]
    payment_proof: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SellRequest {
    seller_address: String,
    ovt_amount: u64,
    btc_address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPaymentRequest {
    #[serde(default)]
    payment_proof: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPaymentResponse {
    valid: bool,
}

async fn buy_ovt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BuyRequest>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .fund
        .buy(
            &request.buyer_address,
            request.ovt_amount,
            request.payment_proof.as_bytes(),
        )
        .await?;
    Ok(Json(transaction))
}

async fn sell_ovt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SellRequest>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .fund
        .sell(
            &request.seller_address,
            request.ovt_amount,
            &request.btc_address,
        )
        .await?;
    Ok(Json(transaction))
}

async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Json<VerifyPaymentResponse> {
    Json(VerifyPaymentResponse {
        valid: state.fund.verify_payment(request.payment_proof.as_bytes()),
    })
}

async fn token_metadata(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let metadata = state.fund.metadata();
    Json(json!(metadata))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/buy_ovt", post(buy_ovt))
        .route("/sell_ovt", post(sell_ovt))
        .route("/verify_payment", post(verify_payment))
        .route("/token", axum::routing::get(token_metadata))
}
