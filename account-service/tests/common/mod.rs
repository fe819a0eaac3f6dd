use std::sync::Arc;

use account_service::domain::account::models::Account;
use account_service::domain::account::models::AccountId;
use account_service::domain::account::models::EmailAddress;
use account_service::domain::account::models::Role;
use account_service::domain::account::models::Username;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::service::AccountService;
use account_service::domain::session::service::SessionService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::CookieSettings;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::InMemorySessionStore;
use chrono::Utc;

pub const SESSION_COOKIE: &str = "nido_session";

/// Test application that spawns the real router on an OS-assigned port,
/// backed by the in-memory store so the suite needs no external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub accounts: Arc<InMemoryAccountRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let repository: Arc<dyn AccountRepository> = accounts.clone();
        let account_service = Arc::new(AccountService::new(repository));
        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemorySessionStore::new()),
            24,
        ));

        let cookie = CookieSettings {
            name: SESSION_COOKIE.to_string(),
            secure: false,
            max_age_hours: 24,
        };

        let router = create_router(account_service, session_service, cookie, address.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: Self::new_client(),
            accounts,
        }
    }

    /// Client with its own cookie store, for requests acting as a
    /// different (or fresh, unauthenticated) principal.
    pub fn new_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    /// Helper to make GET request with the app's default client
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with the app's default client
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with a specific client
    pub fn get_with(&self, client: &reqwest::Client, path: &str) -> reqwest::RequestBuilder {
        client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with a specific client
    pub fn post_with(&self, client: &reqwest::Client, path: &str) -> reqwest::RequestBuilder {
        client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request with a specific client
    pub fn patch_with(&self, client: &reqwest::Client, path: &str) -> reqwest::RequestBuilder {
        client.patch(format!("{}{}", self.address, path))
    }

    /// Insert an account directly into the store. Registration over HTTP
    /// always yields a Parent, so Staff and Admin actors are seeded here.
    pub async fn seed_account(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
        role: Role,
    ) -> Account {
        let account = Account {
            id: AccountId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: email.map(|e| EmailAddress::new(e.to_string()).unwrap()),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            role,
            first_name: "Seed".to_string(),
            last_name: "Account".to_string(),
            qr_token: None,
            qr_enabled: false,
            created_at: Utc::now(),
        };

        self.accounts
            .create(account)
            .await
            .expect("Failed to seed account")
    }
}
