use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// List every account, newest first. Staff-gated.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let accounts = state
        .account_service
        .list()
        .await
        .map_err(ApiError::from)?;

    let data = accounts.iter().map(AccountData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data))
}
