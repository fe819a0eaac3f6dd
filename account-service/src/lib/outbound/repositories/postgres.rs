use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, \
     first_name, last_name, qr_token, qr_enabled, created_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
        let username: String = row.try_get("username").map_err(storage_error)?;
        let email: Option<String> = row.try_get("email").map_err(storage_error)?;
        let role: String = row.try_get("role").map_err(storage_error)?;

        Ok(Account {
            id: AccountId(row.try_get::<Uuid, _>("id").map_err(storage_error)?),
            username: Username::new(username)?,
            email: email.map(EmailAddress::new).transpose()?,
            password_hash: row.try_get("password_hash").map_err(storage_error)?,
            role: role.parse::<Role>()?,
            first_name: row.try_get("first_name").map_err(storage_error)?,
            last_name: row.try_get("last_name").map_err(storage_error)?,
            qr_token: row.try_get("qr_token").map_err(storage_error)?,
            qr_enabled: row.try_get("qr_enabled").map_err(storage_error)?,
            created_at: row.try_get("created_at").map_err(storage_error)?,
        })
    }

    async fn find_one(&self, sql: &str, value: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::account_from_row).transpose()
    }
}

fn storage_error(e: sqlx::Error) -> AccountError {
    AccountError::StorageError(e.to_string())
}

/// Map unique-constraint violations to the matching conflict error.
fn identity_error(e: sqlx::Error, account: &Account) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("accounts_username_key") {
                return AccountError::UsernameTaken(account.username.as_str().to_string());
            }
            if db_err.constraint() == Some("accounts_email_key") {
                let email = account
                    .email
                    .as_ref()
                    .map(|e| e.as_str().to_string())
                    .unwrap_or_default();
                return AccountError::EmailTaken(email);
            }
        }
    }
    storage_error(e)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            "INSERT INTO accounts (id, username, email, password_hash, role, \
             first_name, last_name, qr_token, qr_enabled, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_ref().map(|e| e.as_str()))
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.qr_token.as_deref())
        .bind(account.qr_enabled)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| identity_error(e, &account))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref().map(Self::account_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        self.find_one(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"),
            username,
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.find_one(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"),
            email,
        )
        .await
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::account_from_row).collect()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            "UPDATE accounts SET username = $2, email = $3, password_hash = $4, \
             role = $5, first_name = $6, last_name = $7, qr_token = $8, \
             qr_enabled = $9 WHERE id = $1",
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_ref().map(|e| e.as_str()))
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.qr_token.as_deref())
        .bind(account.qr_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| identity_error(e, &account))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
