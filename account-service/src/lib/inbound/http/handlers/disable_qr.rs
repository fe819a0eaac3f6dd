use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::AuthContext;
use crate::inbound::http::router::AppState;

/// Disable QR login for the caller and clear the stored token.
/// Idempotent: disabling an already-disabled account succeeds.
pub async fn disable_qr(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .account_service
        .disable_qr(&context.account_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "QR login disabled".to_string(),
        },
    ))
}
