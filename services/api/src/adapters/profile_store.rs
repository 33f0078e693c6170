//! services/api/src/adapters/profile_store.rs
//!
//! An in-memory implementation of the `ProfileRepository` port. Profiles live
//! only as long as the process; sessions idle past the configured TTL are
//! treated as gone.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use skincare_core::domain::Profile;
use skincare_core::ports::{PortError, PortResult, ProfileEdit, ProfileRepository, ProfileSession};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Session profiles keyed by session id. Every read-modify-write of a profile
/// happens while holding the write lock, so each session has a single writer.
pub struct InMemoryProfileStore {
    sessions: RwLock<HashMap<Uuid, ProfileSession>>,
    ttl: Duration,
}

impl InMemoryProfileStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Drops every session idle past the TTL and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_accessed_at <= self.ttl);
        before - sessions.len()
    }

    /// Looks up a live session and refreshes its access time. An idle session
    /// is removed on the spot and reported as expired.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, ProfileSession>,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> PortResult<&'a mut ProfileSession> {
        let idle = sessions
            .get(&session_id)
            .map(|s| now - s.last_accessed_at)
            .ok_or_else(|| PortError::NotFound(format!("session {}", session_id)))?;

        if idle > self.ttl {
            sessions.remove(&session_id);
            debug!(session_id = %session_id, "Profile session expired");
            return Err(PortError::Expired(format!("session {}", session_id)));
        }

        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| PortError::NotFound(format!("session {}", session_id)))?;
        session.last_accessed_at = now;
        Ok(session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileStore {
    async fn create_session(&self, profile: Profile) -> PortResult<ProfileSession> {
        let now = Utc::now();
        let session = ProfileSession {
            id: Uuid::new_v4(),
            profile,
            created_at: now,
            last_accessed_at: now,
        };
        self.sessions.write().await.insert(session.id, session.clone());
        debug!(session_id = %session.id, "Created profile session");
        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> PortResult<ProfileSession> {
        let mut sessions = self.sessions.write().await;
        self.live_session(&mut sessions, session_id, Utc::now())
            .map(|session| session.clone())
    }

    async fn save_profile(&self, session_id: Uuid, profile: Profile) -> PortResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, session_id, Utc::now())?;
        session.profile = profile;
        Ok(())
    }

    async fn update_profile(&self, session_id: Uuid, edit: ProfileEdit<'_>) -> PortResult<Profile> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, session_id, Utc::now())?;
        if edit(&mut session.profile) {
            debug!(session_id = %session_id, "Updated session profile");
        }
        Ok(session.profile.clone())
    }

    async fn delete_session(&self, session_id: Uuid) -> PortResult<()> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(format!("session {}", session_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn round_trips_profile_changes() {
        let store = InMemoryProfileStore::new(Duration::minutes(10));
        let session = store.create_session(Profile::guest()).await.unwrap();

        let mut profile = session.profile.clone();
        profile.add_allergy("Parabens");
        store.save_profile(session.id, profile).await.unwrap();

        let reloaded = store.get_session(session.id).await.unwrap();
        assert_eq!(reloaded.profile.allergies, vec!["fragrance", "parabens"]);
        assert!(reloaded.last_accessed_at >= session.last_accessed_at);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_edits_on_one_session_are_all_kept() {
        let store = Arc::new(InMemoryProfileStore::new(Duration::minutes(10)));
        let session = store.create_session(Profile::guest()).await.unwrap();

        let allergies: Vec<String> = (0..16).map(|n| format!("allergen {}", n)).collect();
        let tasks: Vec<_> = allergies
            .iter()
            .cloned()
            .map(|allergy| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update_profile(session.id, Box::new(move |p: &mut Profile| p.add_allergy(&allergy)))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let profile = store.get_session(session.id).await.unwrap().profile;
        assert_eq!(profile.allergies.len(), allergies.len() + 1);
        for allergy in &allergies {
            assert!(profile.allergies.contains(allergy), "lost {}", allergy);
        }
    }

    #[tokio::test]
    async fn update_reports_the_edited_profile() {
        let store = InMemoryProfileStore::new(Duration::minutes(10));
        let session = store.create_session(Profile::guest()).await.unwrap();

        let profile = store
            .update_profile(session.id, Box::new(|p: &mut Profile| p.add_allergy("Sulfates")))
            .await
            .unwrap();
        assert_eq!(profile.allergies, vec!["fragrance", "sulfates"]);

        let unchanged = store
            .update_profile(session.id, Box::new(|p: &mut Profile| p.add_allergy("sulfates")))
            .await
            .unwrap();
        assert_eq!(unchanged, profile);

        assert!(matches!(
            store
                .update_profile(Uuid::new_v4(), Box::new(|p: &mut Profile| p.add_allergy("x")))
                .await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_sessions_are_not_found() {
        let store = InMemoryProfileStore::new(Duration::minutes(10));
        let id = Uuid::new_v4();
        assert!(matches!(store.get_session(id).await, Err(PortError::NotFound(_))));
        assert!(matches!(
            store.save_profile(id, Profile::guest()).await,
            Err(PortError::NotFound(_))
        ));
        assert!(matches!(store.delete_session(id).await, Err(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = InMemoryProfileStore::new(Duration::milliseconds(1));
        let session = store.create_session(Profile::guest()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(matches!(store.get_session(session.id).await, Err(PortError::Expired(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn purge_removes_only_idle_sessions() {
        let store = InMemoryProfileStore::new(Duration::milliseconds(50));
        store.create_session(Profile::guest()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(80)).await;
        store.create_session(Profile::guest()).await.unwrap();

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
    }
}
