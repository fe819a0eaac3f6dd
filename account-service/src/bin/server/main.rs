use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::service::AccountService;
use account_service::domain::session::service::SessionService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::CookieSettings;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::InMemorySessionStore;
use account_service::outbound::repositories::PostgresAccountRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        session_ttl_hours = config.session.ttl_hours,
        "Configuration loaded"
    );

    let account_repository: Arc<dyn AccountRepository> = match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database ready");
            Arc::new(PostgresAccountRepository::new(pg_pool))
        }
        None => {
            tracing::info!(database = "in-memory", "No database configured, using in-process store");
            Arc::new(InMemoryAccountRepository::new())
        }
    };

    let account_service = Arc::new(AccountService::new(account_repository));
    let session_service = Arc::new(SessionService::new(
        Arc::new(InMemorySessionStore::new()),
        config.session.ttl_hours,
    ));

    let cookie = CookieSettings {
        name: config.session.cookie_name.clone(),
        secure: config.session.cookie_secure,
        max_age_hours: config.session.ttl_hours,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        session_service,
        cookie,
        config.server.public_url.clone(),
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
