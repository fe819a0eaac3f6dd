use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use thiserror::Error;

use super::session_cookie;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::UsernameError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;
use crate::inbound::http::router::AppState;

/// Self-registration. Always produces a Parent account; a role field in
/// the body, if any, is discarded before it reaches the domain. The new
/// principal is logged in immediately.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(CookieJar, ApiSuccess<AccountData>), ApiError> {
    let command = body.try_into_command()?;

    let account = state
        .account_service
        .register(command)
        .await
        .map_err(ApiError::from)?;

    let session = state.session_service.create(account.id).await?;
    let jar = jar.add(session_cookie(&state.cookie, &session));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::CREATED, AccountData::from(&account)),
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    username: String,
    email: Option<String>,
    password: String,
    confirm_password: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        if self.password != self.confirm_password {
            return Err(ParseRegisterRequestError::PasswordMismatch);
        }

        let username = Username::new(self.username)?;
        // Browsers submit absent optional fields as empty strings
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .map(EmailAddress::new)
            .transpose()?;

        Ok(RegisterCommand {
            username,
            email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
