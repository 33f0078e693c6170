//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the helper handlers use to
//! edit the calling session's profile.

use crate::config::Config;
use axum::http::StatusCode;
use skincare_core::ports::{PortError, ProfileRepository};
use skincare_core::{Catalog, Profile};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
/// The catalog is read-only and shared without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub config: Arc<Config>,
}

//=========================================================================================
// Session Profile Helpers
//=========================================================================================

/// Maps a port failure to the HTTP status a handler should return.
pub fn port_error_response(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(what) | PortError::Expired(what) => {
            (StatusCode::UNAUTHORIZED, format!("No active {}", what))
        }
        PortError::Unexpected(msg) => {
            error!("Profile store failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Profile store failure".to_string(),
            )
        }
    }
}

impl AppState {
    /// Applies `change` to the session profile through the store's atomic
    /// update and returns the resulting profile.
    pub async fn update_profile<'a, F>(
        &self,
        session_id: Uuid,
        change: F,
    ) -> Result<Profile, (StatusCode, String)>
    where
        F: FnOnce(&mut Profile) -> bool + Send + 'a,
    {
        self.profiles
            .update_profile(session_id, Box::new(change))
            .await
            .map_err(port_error_response)
    }
}
