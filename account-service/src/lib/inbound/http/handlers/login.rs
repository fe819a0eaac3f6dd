use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::session_cookie;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Password login. The identifier is a username or an email address;
/// both failure causes collapse into one generic 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<AccountData>), ApiError> {
    let account = state
        .account_service
        .verify_credentials(&body.identifier, &body.password)
        .await
        .map_err(ApiError::from)?;

    let session = state.session_service.create(account.id).await?;
    let jar = jar.add(session_cookie(&state.cookie, &session));

    Ok((jar, ApiSuccess::new(StatusCode::OK, AccountData::from(&account))))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    identifier: String,
    password: String,
}
