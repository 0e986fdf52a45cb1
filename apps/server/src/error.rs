//! API error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use ovt_core::fund::FundError;
use ovt_core::governance::GovernanceError;
use ovt_core::Error as CoreError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Core error wrapped for HTTP responses.
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Governance(err) => match err {
                GovernanceError::NotAnAdmin(_) | GovernanceError::InvalidSignature { .. } => {
                    StatusCode::FORBIDDEN
                }
                GovernanceError::ActionNotFound(_) => StatusCode::NOT_FOUND,
                GovernanceError::QuorumNotReached { .. }
                | GovernanceError::SessionClosed { .. }
                | GovernanceError::SignatureCapReached => StatusCode::CONFLICT,
                GovernanceError::InvalidRegistry { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            CoreError::Fund(err) => match err {
                FundError::InsufficientFunds { .. }
                | FundError::ZeroSupply
                | FundError::InvalidPaymentProof => StatusCode::UNPROCESSABLE_ENTITY,
                FundError::ArithmeticOverflow => StatusCode::INTERNAL_SERVER_ERROR,
            },
            CoreError::PriceFeed(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("API error: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
