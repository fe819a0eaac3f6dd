use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionStore;

/// In-process account store.
///
/// Default backend when no database is configured. An RwLock over a map
/// gives the required concurrent-read safety; writes are last-write-wins.
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Uniqueness check against every account except `exclude`.
    fn identity_conflict(
        accounts: &HashMap<AccountId, Account>,
        candidate: &Account,
        exclude: Option<&AccountId>,
    ) -> Option<AccountError> {
        for account in accounts.values() {
            if Some(&account.id) == exclude {
                continue;
            }
            if account.username.as_str() == candidate.username.as_str() {
                return Some(AccountError::UsernameTaken(
                    candidate.username.as_str().to_string(),
                ));
            }
            if let (Some(existing), Some(new)) = (&account.email, &candidate.email) {
                if existing.as_str() == new.as_str() {
                    return Some(AccountError::EmailTaken(new.as_str().to_string()));
                }
            }
        }
        None
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if let Some(conflict) = Self::identity_conflict(&accounts, &account, None) {
            return Err(conflict);
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| {
                account
                    .email
                    .as_ref()
                    .is_some_and(|existing| existing.as_str() == email)
            })
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        if let Some(conflict) = Self::identity_conflict(&accounts, &account, Some(&account.id)) {
            return Err(conflict);
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

/// In-process session store.
///
/// Sessions are ephemeral by design: a restart logs everyone out, which
/// the absolute expiry already allows for.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
