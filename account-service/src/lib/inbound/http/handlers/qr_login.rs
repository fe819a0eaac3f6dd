use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::session_cookie;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Redeem a QR credential from an unauthenticated client.
///
/// Terminates in the same session issuance as password login. A
/// malformed uid gets the same generic 401 as a wrong token so the
/// response never narrows down what was wrong.
pub async fn qr_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<QrLoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<AccountData>), ApiError> {
    let account_id = AccountId::from_string(&body.uid)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired QR code".to_string()))?;

    let account = state
        .account_service
        .redeem_qr_token(&account_id, &body.token)
        .await
        .map_err(ApiError::from)?;

    let session = state.session_service.create(account.id).await?;
    let jar = jar.add(session_cookie(&state.cookie, &session));

    Ok((jar, ApiSuccess::new(StatusCode::OK, AccountData::from(&account))))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QrLoginRequestBody {
    uid: String,
    token: String,
}
