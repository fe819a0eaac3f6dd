use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::domain::session::models::SessionId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Authenticated principal for the current request.
///
/// Inserted into request extensions by the session middleware and passed
/// explicitly to whatever needs it; nothing reads ambient request state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: AccountId,
    pub role: Role,
}

/// Middleware resolving the session cookie to an `AuthContext`.
///
/// A request without a live session stops here with 401: the caller has
/// not proven who they are. A session whose account has disappeared is
/// treated the same as an expired one.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(cookie) = jar.get(state.cookie.name.as_str()) else {
        return Err(unauthorized("Authentication required"));
    };

    let session_id = SessionId(cookie.value().to_string());

    let session = state
        .session_service
        .resolve(&session_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Session lookup failed");
            ApiError::InternalServerError(e.to_string()).into_response()
        })?
        .ok_or_else(|| unauthorized("Invalid or expired session"))?;

    let account = match state.account_service.get(&session.account_id).await {
        Ok(account) => account,
        Err(AccountError::NotFound(_)) => {
            return Err(unauthorized("Invalid or expired session"));
        }
        Err(e) => {
            tracing::error!(error = %e, "Account lookup failed during session resolution");
            return Err(ApiError::InternalServerError(e.to_string()).into_response());
        }
    };

    req.extensions_mut().insert(AuthContext {
        account_id: account.id,
        role: account.role,
    });

    Ok(next.run(req).await)
}

/// Role gate requiring Staff (Admin always passes).
pub async fn require_staff(req: Request, next: Next) -> Result<Response, Response> {
    authorize(req, next, &[Role::Staff]).await
}

/// Role gate requiring Admin.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    authorize(req, next, &[Role::Admin]).await
}

/// The authorization gate shared by every protected business route.
///
/// 401 when no principal resolved (prove who you are), 403 when the
/// principal's role is outside the required set (you proved it but may
/// not pass). Admin passes every gate unconditionally.
async fn authorize(req: Request, next: Next, required: &[Role]) -> Result<Response, Response> {
    let Some(context) = req.extensions().get::<AuthContext>() else {
        return Err(unauthorized("Authentication required"));
    };

    if context.role.satisfies(required) {
        Ok(next.run(req).await)
    } else {
        tracing::debug!(account_id = %context.account_id, role = %context.role, "Role check failed");
        Err(ApiError::Forbidden("Insufficient role".to_string()).into_response())
    }
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
