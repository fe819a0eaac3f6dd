use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::AccountId;

/// Server-side session record.
///
/// Binds an opaque cookie value to an account for a bounded window. The
/// id is the secret; it never appears in logs.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its absolute expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Opaque session identifier, generated from CSPRNG output.
///
/// Deliberately has no Display impl: the value is a bearer secret and
/// must only travel in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh unguessable session id.
    pub fn generate() -> Self {
        Self(auth::SecretToken::generate())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
