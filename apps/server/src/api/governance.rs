use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ovt_core::errors::{Error as CoreError, ValidationError};
use ovt_core::governance::{ActionKind, ApprovalState, PendingAction};
use ovt_core::positions::NewPosition;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProposeRequest {
    kind: ActionKind,
    description: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    address: String,
    signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionStatusResponse {
    state: ApprovalState,
    signature_count: usize,
    /// Digest the admins sign, hex-encoded.
    digest: String,
    action: PendingAction,
}

async fn propose_action(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProposeRequest>,
) -> ApiResult<Json<PendingAction>> {
    let action = state
        .governance
        .propose(request.kind, request.description, request.payload)?;
    Ok(Json(action))
}

async fn sign_action(
    State(state): State<Arc<AppState>>,
    Path(action_id): Path<String>,
    Json(request): Json<SignRequest>,
) -> ApiResult<Json<ActionStatusResponse>> {
    state
        .governance
        .sign(&action_id, &request.address, &request.signature)?;
    action_status(State(state), Path(action_id)).await
}

async fn action_status(
    State(state): State<Arc<AppState>>,
    Path(action_id): Path<String>,
) -> ApiResult<Json<ActionStatusResponse>> {
    let (approval_state, action) = state.governance.status(&action_id)?;
    Ok(Json(ActionStatusResponse {
        state: approval_state,
        signature_count: action.signatures.len(),
        digest: action.digest_hex(),
        action,
    }))
}

async fn cancel_action(
    State(state): State<Arc<AppState>>,
    Path(action_id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.governance.cancel(&action_id)?;
    Ok(Json(serde_json::json!({ "cancelled": true })))
}

fn payload_amount(payload: &Value) -> Result<u64, CoreError> {
    payload
        .get("amount")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            CoreError::Validation(ValidationError::MissingField("amount".to_string()))
        })
}

/// Executes an approved action, dispatching on its kind.
async fn execute_action(
    State(state): State<Arc<AppState>>,
    Path(action_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let (_, action) = state.governance.status(&action_id)?;
    let digest = action.digest();

    let result = match action.kind {
        ActionKind::MintTokens => {
            let amount = payload_amount(&action.payload)?;
            let fund = state.fund.clone();
            let transaction = state
                .governance
                .execute(&action_id, move |signatures| async move {
                    fund.mint(amount, &digest, &signatures).await
                })
                .await?;
            serde_json::to_value(transaction).map_err(CoreError::from)?
        }
        ActionKind::BurnTokens => {
            let amount = payload_amount(&action.payload)?;
            let fund = state.fund.clone();
            let transaction = state
                .governance
                .execute(&action_id, move |signatures| async move {
                    fund.burn(amount, &digest, &signatures).await
                })
                .await?;
            serde_json::to_value(transaction).map_err(CoreError::from)?
        }
        ActionKind::AddPosition => {
            let new_position: NewPosition =
                serde_json::from_value(action.payload.clone()).map_err(CoreError::from)?;
            let positions = state.position_service.clone();
            let position = state
                .governance
                .execute(&action_id, move |_signatures| async move {
                    positions.add_position(new_position).await
                })
                .await?;
            serde_json::to_value(position).map_err(CoreError::from)?
        }
        ActionKind::ExitPosition => {
            let position_id = action
                .payload
                .get("positionId")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    CoreError::Validation(ValidationError::MissingField("positionId".to_string()))
                })?
                .to_string();
            let positions = state.position_service.clone();
            let position = state
                .governance
                .execute(&action_id, move |_signatures| async move {
                    positions.exit_position(&position_id).await
                })
                .await?;
            serde_json::to_value(position).map_err(CoreError::from)?
        }
    };

    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actions", post(propose_action))
        .route("/actions/{id}", get(action_status))
        .route("/actions/{id}/sign", post(sign_action))
        .route("/actions/{id}/cancel", post(cancel_action))
        .route("/actions/{id}/execute", post(execute_action))
}
