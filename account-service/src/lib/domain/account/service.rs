use std::sync::Arc;

use auth::SecretToken;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;

/// Domain service for account operations.
///
/// Owns password hashing; the repository backend is injected so the store
/// (in-memory map, Postgres) is swappable without touching auth logic.
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    password_hasher: auth::PasswordHasher,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Register a new account.
    ///
    /// The role is always Parent: self-registration must not be able to
    /// grant Staff or Admin, whatever the caller supplied.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Identity already registered
    /// * `Password` - Hashing failed
    /// * `StorageError` - Backend operation failed
    pub async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: Role::Parent,
            first_name: command.first_name,
            last_name: command.last_name,
            qr_token: None,
            qr_enabled: false,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");
        Ok(created)
    }

    /// Verify a password login.
    ///
    /// The identifier is matched against usernames first, then emails.
    /// Every failure path returns the same `InvalidCredentials` so a
    /// caller cannot probe which usernames or emails exist.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No match, or the password does not verify
    /// * `Password` - Stored hash is unreadable
    /// * `StorageError` - Backend operation failed
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let account = match self.repository.find_by_username(identifier).await? {
            Some(account) => Some(account),
            None => self.repository.find_by_email(identifier).await?,
        };

        let Some(account) = account else {
            return Err(AccountError::InvalidCredentials);
        };

        if self
            .password_hasher
            .verify(password, &account.password_hash)?
        {
            Ok(account)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    /// Retrieve an account by id.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageError` - Backend operation failed
    pub async fn get(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    /// Retrieve all accounts, newest first.
    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    /// Set an account's role.
    ///
    /// A principal's role is immutable to the principal itself; the route
    /// layer exposes this operation behind the admin gate only.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageError` - Backend operation failed
    pub async fn change_role(&self, id: &AccountId, role: Role) -> Result<Account, AccountError> {
        let mut account = self.get(id).await?;
        account.role = role;
        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, role = %updated.role, "Role changed");
        Ok(updated)
    }

    /// Issue a fresh QR bearer token for an account and enable QR login.
    ///
    /// Overwrites any previous token, which invalidates it. The plaintext
    /// token is returned once, for embedding in the scannable URL; it is
    /// never exposed through account reads.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageError` - Backend operation failed
    pub async fn issue_qr_token(
        &self,
        id: &AccountId,
    ) -> Result<(Account, String), AccountError> {
        let mut account = self.get(id).await?;

        let token = SecretToken::generate();
        account.qr_token = Some(token.clone());
        account.qr_enabled = true;

        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, "QR login enabled");
        Ok((updated, token))
    }

    /// Disable QR login and clear the stored token. Idempotent.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageError` - Backend operation failed
    pub async fn disable_qr(&self, id: &AccountId) -> Result<Account, AccountError> {
        let mut account = self.get(id).await?;
        account.qr_token = None;
        account.qr_enabled = false;

        let updated = self.repository.update(account).await?;
        tracing::info!(account_id = %updated.id, "QR login disabled");
        Ok(updated)
    }

    /// Redeem a QR credential.
    ///
    /// Succeeds only if the account exists, QR login is enabled, and the
    /// stored token equals the supplied token exactly (constant-time).
    /// Every failure path returns the same `InvalidQrCredential`.
    ///
    /// # Errors
    /// * `InvalidQrCredential` - Any of the three conditions failed
    /// * `StorageError` - Backend operation failed
    pub async fn redeem_qr_token(
        &self,
        id: &AccountId,
        token: &str,
    ) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::InvalidQrCredential)?;

        if !account.qr_enabled {
            return Err(AccountError::InvalidQrCredential);
        }

        let Some(stored) = account.qr_token.as_deref() else {
            return Err(AccountError::InvalidQrCredential);
        };

        if !SecretToken::matches(stored, token) {
            return Err(AccountError::InvalidQrCredential);
        }

        Ok(account)
    }
}
