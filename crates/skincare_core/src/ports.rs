//! crates/skincare_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The catalog is plain read-only data and needs no port; session profiles
//! are the only mutable state and live behind `ProfileRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Profile;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Session expired: {0}")]
    Expired(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Session Profiles
//=========================================================================================

/// A browsing session and the profile it owns.
#[derive(Debug, Clone)]
pub struct ProfileSession {
    pub id: Uuid,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

/// An in-place profile edit. Returns whether the profile changed.
pub type ProfileEdit<'a> = Box<dyn FnOnce(&mut Profile) -> bool + Send + 'a>;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Starts a new session owning the given profile.
    async fn create_session(&self, profile: Profile) -> PortResult<ProfileSession>;

    /// Fetches a live session and refreshes its access time.
    async fn get_session(&self, session_id: Uuid) -> PortResult<ProfileSession>;

    /// Replaces the session's profile wholesale.
    async fn save_profile(&self, session_id: Uuid, profile: Profile) -> PortResult<()>;

    /// Applies `edit` to the session's profile as one step, so concurrent
    /// edits on the same session never overwrite each other. Returns the
    /// profile as it stands afterwards.
    async fn update_profile(&self, session_id: Uuid, edit: ProfileEdit<'_>) -> PortResult<Profile>;

    async fn delete_session(&self, session_id: Uuid) -> PortResult<()>;
}
