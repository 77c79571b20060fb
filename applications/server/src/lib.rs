//! PlanZen Server Library
//!
//! Planner server: account and session handling, per-user collections of
//! todos, routines, appointments and events, and the gated web app pages.
//!
//! This library exposes the router and its parts for the binary and tests.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::AuthService;
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use planzen_core::{Appointment, Event, Routine, Todo};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// - `/api/...`: JSON API; everything but auth and health needs a session
/// - gated pages (`/`, `/login`, `/register`, `/logout`, `/profile`)
/// - any other path: static files from the web directory
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/recover-password", post(api::auth::recover_password))
        .route("/auth/confirm-password", post(api::auth::confirm_password));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(api::auth::me))
        .merge(api::records::routes::<Todo>())
        .merge(api::records::routes::<Routine>())
        .merge(api::records::routes::<Appointment>())
        .merge(api::records::routes::<Event>())
        .route_layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    let mut pages = Router::new();
    for page in middleware::session_gate::GATED_PAGES {
        pages = pages.route(page, get(api::pages::index));
    }
    let pages = pages.route_layer(axum_middleware::from_fn(middleware::session_gate));

    let assets = ServeDir::new(app_state.web_dir.as_path());

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .merge(pages)
        .fallback_service(assets)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
