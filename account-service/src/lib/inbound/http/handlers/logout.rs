use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use super::clear_session_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::session::models::SessionId;
use crate::inbound::http::router::AppState;

/// Destroy the caller's session and clear the cookie.
///
/// Idempotent: an anonymous call, or one carrying a stale cookie, still
/// returns 200 with the cookie cleared.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    if let Some(cookie) = jar.get(state.cookie.name.as_str()) {
        let session_id = SessionId(cookie.value().to_string());
        state.session_service.destroy(&session_id).await?;
    }

    let jar = jar.remove(clear_session_cookie(&state.cookie));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            MessageData {
                message: "Logged out".to_string(),
            },
        ),
    ))
}
