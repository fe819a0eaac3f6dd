use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;

/// Persistence operations for the account aggregate.
///
/// Accounts are never hard-deleted, so the port exposes no delete. Lookup
/// methods take raw strings: login identifiers arrive unvalidated and a
/// failed lookup must stay indistinguishable from a malformed one.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `StorageError` - Backend operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by exact username.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by exact email address.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts, newest first.
    ///
    /// # Errors
    /// * `StorageError` - Backend operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Replace an existing account. Last write wins; no locking.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UsernameTaken` / `EmailTaken` - New value collides with another account
    /// * `StorageError` - Backend operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}
