//! # Taskboard Gateway Crate
//!
//! This crate provides the HTTP layer of the Taskboard backend: the axum
//! router, shared request state, authentication and logging middleware,
//! the API error type, and the REST handlers with their OpenAPI docs.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **State**: Shared application state carrying the domain services
//! - **Middleware**: Bearer authentication and request logging
//! - **Error**: Semantic status mapping for domain errors

pub mod docs;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
mod util;

pub use error::{ApiError, ErrorResponse};
pub use middleware::AuthUser;
pub use state::GatewayState;
pub use util::require_bearer;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let public = Router::new()
        .route("/api/health", get(rest::health::health_check))
        .route("/api/auth/register", post(rest::auth::register))
        .route("/api/auth/login", post(rest::auth::login));

    let protected = Router::new()
        .route(
            "/api/profile",
            get(rest::profile::get_profile).put(rest::profile::update_profile),
        )
        .route("/api/auth/logout", post(rest::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // interactive API docs are a development aid only
    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router = router.merge(
            SwaggerUi::new("/docs").url("/docs/openapi.json", docs::ApiDoc::openapi()),
        );
    }

    router
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
