//! services/api/src/web/middleware.rs
//!
//! Session middleware for routes that need a profile.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::web::state::AppState;

/// Header carrying the session id returned by `POST /sessions`.
pub const SESSION_HEADER: &str = "x-session-id";

/// Middleware that validates the session header and loads the session.
///
/// If valid, inserts the `ProfileSession` into request extensions, so handlers
/// read the profile without a second store lookup.
/// A missing or malformed header is a 400; an unknown or expired session is a 401.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // 1. Extract and parse the session header
    let session_id = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("{} header is required", SESSION_HEADER),
            )
        })?;

    let session_id = Uuid::parse_str(session_id.trim()).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} format", SESSION_HEADER),
        )
    })?;

    // 2. Validate the session against the profile store
    let session = state.profiles.get_session(session_id).await.map_err(|e| {
        debug!("Rejected session {}: {}", session_id, e);
        (StatusCode::UNAUTHORIZED, e.to_string())
    })?;

    // 3. Insert the loaded session into request extensions
    req.extensions_mut().insert(session);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}
