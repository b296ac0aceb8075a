//! Mock repository implementations for testing core service functionality

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use taskboard_database::{Profile, ProfileResult};

/// Mock profile repository for testing
pub struct MockProfileRepository {
    profiles: Arc<RwLock<HashMap<i64, Profile>>>,
    writes: Arc<RwLock<u64>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> ProfileResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }

    pub async fn upsert(&self, profile: &Profile) -> ProfileResult<Profile> {
        let mut writes = self.writes.write().await;
        *writes += 1;

        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .entry(profile.user_id)
            .and_modify(|existing| {
                // login stamps are owned by the login flow; updates keep them
                existing.mail_notifications = profile.mail_notifications;
                existing.updated_at = chrono::Utc::now().to_rfc3339();
            })
            .or_insert_with(|| {
                let mut created = profile.clone();
                created.updated_at = chrono::Utc::now().to_rfc3339();
                created
            });
        Ok(stored.clone())
    }

    pub async fn record_login(&self, user_id: i64) -> ProfileResult<Profile> {
        let mut writes = self.writes.write().await;
        *writes += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .entry(user_id)
            .and_modify(|existing| {
                existing.last_login = Some(now.clone());
                existing.updated_at = now.clone();
            })
            .or_insert_with(|| {
                let mut created = Profile::new(user_id);
                created.last_login = Some(now.clone());
                created
            });
        Ok(stored.clone())
    }

    /// Number of mutations that reached the repository
    pub async fn write_count(&self) -> u64 {
        *self.writes.read().await
    }

    /// Seed a profile row directly, bypassing the service
    pub async fn insert_profile(&self, profile: Profile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id, profile);
    }
}
