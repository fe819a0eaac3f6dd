use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthContext;
use crate::inbound::http::router::AppState;

/// Issue a fresh QR bearer credential for the caller.
///
/// The returned URL carries the account id and the token as cleartext
/// query parameters: whoever scans (or captures) the rendered code can
/// log in as this account until QR login is disabled or the token is
/// regenerated.
pub async fn generate_qr_token(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<ApiSuccess<QrTokenData>, ApiError> {
    let (account, token) = state
        .account_service
        .issue_qr_token(&context.account_id)
        .await
        .map_err(ApiError::from)?;

    let qr_url = format!(
        "{}/qr-login?uid={}&token={}",
        state.public_url.trim_end_matches('/'),
        account.id,
        token
    );

    Ok(ApiSuccess::new(StatusCode::OK, QrTokenData { qr_url }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrTokenData {
    pub qr_url: String,
}
