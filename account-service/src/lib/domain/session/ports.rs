use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;

/// Storage for server-side sessions.
///
/// Implementations must be safe under concurrent reads from requests of
/// different users; per-entry writes are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a session.
    async fn insert(&self, session: Session) -> Result<(), SessionError>;

    /// Look up a session by id. Returns expired sessions as stored; the
    /// caller decides expiry.
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, SessionError>;

    /// Remove a session. Removing an absent session is not an error.
    async fn remove(&self, id: &SessionId) -> Result<(), SessionError>;
}
