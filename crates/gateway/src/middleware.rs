//! Middleware for authentication and request logging

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use taskboard_database::UserRole;

use crate::state::GatewayState;
use crate::util::require_bearer;
use crate::ApiError;

/// Authenticated principal placed into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub role: UserRole,
}

/// Resolve the bearer token into an [`AuthUser`] before the handler runs.
///
/// Handlers behind this middleware read the principal from request
/// extensions and never touch credentials themselves.
pub async fn auth_middleware(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = require_bearer(request.headers())?;
    let (user, _session) = state.authenticate(&token).await?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}
