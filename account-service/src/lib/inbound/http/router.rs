use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_account::current_account;
use super::handlers::disable_qr::disable_qr;
use super::handlers::generate_qr_token::generate_qr_token;
use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::qr_login::qr_login;
use super::handlers::register::register;
use super::handlers::update_role::update_role;
use super::middleware::authenticate;
use super::middleware::require_admin;
use super::middleware::require_staff;
use crate::domain::account::service::AccountService;
use crate::domain::session::service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub session_service: Arc<SessionService>,
    pub cookie: CookieSettings,
    pub public_url: String,
}

/// Session cookie parameters, sourced from configuration.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_hours: i64,
}

pub fn create_router(
    account_service: Arc<AccountService>,
    session_service: Arc<SessionService>,
    cookie: CookieSettings,
    public_url: String,
) -> Router {
    let state = AppState {
        account_service,
        session_service,
        cookie,
        public_url,
    };

    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/qr-login", post(qr_login));

    let session_routes = Router::new()
        .route("/auth/me", get(current_account))
        .route("/auth/generate-qr-token", post(generate_qr_token))
        .route("/auth/disable-qr", post(disable_qr));

    let staff_routes = Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:account_id", get(get_account))
        .route_layer(middleware::from_fn(require_staff));

    let admin_routes = Router::new()
        .route("/accounts/:account_id/role", patch(update_role))
        .route_layer(middleware::from_fn(require_admin));

    // The session middleware is layered outside the role gates so every
    // protected route sees an AuthContext before its gate runs
    let protected_routes = Router::new()
        .merge(session_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
