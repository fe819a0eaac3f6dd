use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionStore;

/// Session lifecycle service.
///
/// Sessions carry an absolute expiry stamped at creation; there is no
/// sliding renewal. Expired entries are evicted lazily on first
/// resolution after expiry.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, ttl_hours: i64) -> Self {
        Self {
            store,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Create a session for an account. Both the password and the QR
    /// login paths terminate here, so the resulting sessions are
    /// indistinguishable.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    pub async fn create(&self, account_id: AccountId) -> Result<Session, SessionError> {
        let session = Session {
            id: SessionId::generate(),
            account_id,
            expires_at: Utc::now() + self.ttl,
        };

        self.store.insert(session.clone()).await?;
        tracing::debug!(account_id = %session.account_id, "Session created");
        Ok(session)
    }

    /// Resolve a session id to a live session.
    ///
    /// Returns None for unknown ids and for expired sessions; expired
    /// entries are removed on the way out.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    pub async fn resolve(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        match self.store.find(id).await? {
            Some(session) if session.is_expired(Utc::now()) => {
                self.store.remove(id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Destroy a session. Idempotent: destroying an absent session
    /// succeeds, so logout can never fail for lack of a session.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    pub async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        self.store.remove(id).await
    }
}
