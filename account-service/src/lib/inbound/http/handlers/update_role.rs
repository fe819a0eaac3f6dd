use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::inbound::http::router::AppState;

/// Set an account's role. Admin-gated: this is the only mutation path
/// for a role, so a principal can never escalate itself.
pub async fn update_role(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(body): Json<UpdateRoleRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let id = AccountId::from_string(&account_id).map_err(AccountError::from)?;
    let role = body.role.parse::<Role>().map_err(AccountError::from)?;

    let account = state
        .account_service
        .change_role(&id, role)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(StatusCode::OK, AccountData::from(&account)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRoleRequestBody {
    role: String,
}
