//! Profile service for managing notification preferences and login stamps.

use sqlx::sqlite::SqlitePool;
use tracing::debug;

use taskboard_database::{Profile, ProfileRepository, ProfileResult};

use super::mock_repositories::MockProfileRepository;
use crate::types::ProfileTo;
use crate::utils::assure_id_consistent;

/// Service for managing profile operations
pub struct ProfileService<R> {
    profile_repository: R,
}

impl ProfileService<ProfileRepository> {
    /// Create a new profile service instance with real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            profile_repository: ProfileRepository::new(pool),
        }
    }
}

impl ProfileService<MockProfileRepository> {
    /// Create a new profile service instance for testing
    pub fn new_for_testing() -> Self {
        Self {
            profile_repository: MockProfileRepository::new(),
        }
    }
}

impl<R> ProfileService<R>
where
    R: ProfileRepo,
{
    /// Get a user's profile, or None when no preferences were saved yet
    pub async fn get_profile(&self, user_id: i64) -> ProfileResult<Option<ProfileTo>> {
        let profile = self.profile_repository.find_by_user_id(user_id).await?;
        Ok(profile.as_ref().map(ProfileTo::from))
    }

    /// Replace a user's notification preferences with the submitted set
    ///
    /// The payload id must belong to the authenticated user; nothing is
    /// written when it does not. Users without a stored profile get one.
    pub async fn update_profile(
        &self,
        user_id: i64,
        transfer: &ProfileTo,
    ) -> ProfileResult<ProfileTo> {
        assure_id_consistent(transfer.id, user_id)?;

        let mut profile = self
            .profile_repository
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| Profile::new(user_id));
        transfer.apply_to(&mut profile);

        let stored = self.profile_repository.upsert(&profile).await?;
        debug!(user_id, "updated profile preferences");

        Ok(ProfileTo::from(&stored))
    }

    /// Stamp the profile with the current time as last login
    pub async fn record_login(&self, user_id: i64) -> ProfileResult<ProfileTo> {
        let stored = self.profile_repository.record_login(user_id).await?;
        debug!(user_id, "recorded login");
        Ok(ProfileTo::from(&stored))
    }
}

/// Trait for profile repositories to allow generic usage
pub trait ProfileRepo {
    async fn find_by_user_id(&self, user_id: i64) -> ProfileResult<Option<Profile>>;
    async fn upsert(&self, profile: &Profile) -> ProfileResult<Profile>;
    async fn record_login(&self, user_id: i64) -> ProfileResult<Profile>;
}

impl ProfileRepo for ProfileRepository {
    async fn find_by_user_id(&self, user_id: i64) -> ProfileResult<Option<Profile>> {
        self.find_by_user_id(user_id).await
    }

    async fn upsert(&self, profile: &Profile) -> ProfileResult<Profile> {
        self.upsert(profile).await
    }

    async fn record_login(&self, user_id: i64) -> ProfileResult<Profile> {
        self.record_login(user_id).await
    }
}

impl ProfileRepo for MockProfileRepository {
    async fn find_by_user_id(&self, user_id: i64) -> ProfileResult<Option<Profile>> {
        self.find_by_user_id(user_id).await
    }

    async fn upsert(&self, profile: &Profile) -> ProfileResult<Profile> {
        self.upsert(profile).await
    }

    async fn record_login(&self, user_id: i64) -> ProfileResult<Profile> {
        self.record_login(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MailNotification;
    use std::collections::BTreeSet;
    use taskboard_database::ProfileError;

    fn create_test_service() -> ProfileService<MockProfileRepository> {
        ProfileService::new_for_testing()
    }

    fn preferences(labels: &[&str]) -> ProfileTo {
        ProfileTo {
            id: None,
            mail_notifications: labels.iter().map(|label| label.to_string()).collect(),
            disabled_notifications: BTreeSet::new(),
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_update_profile_enables_categories() {
        let service = create_test_service();

        let saved = service
            .update_profile(1, &preferences(&["NEWS", "DEADLINE"]))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(1));
        assert!(saved.mail_notifications.contains("NEWS"));
        assert!(saved.mail_notifications.contains("DEADLINE"));
        assert!(saved.disabled_notifications.contains("ASSIGNED"));
        assert!(saved.disabled_notifications.contains("OVERDUE"));
        assert!(saved.disabled_notifications.contains("MENTIONED"));
    }

    #[tokio::test]
    async fn test_update_profile_matching_id() {
        let service = create_test_service();
        let mut request = preferences(&["NEWS"]);
        request.id = Some(1);

        let saved = service.update_profile(1, &request).await.unwrap();
        assert_eq!(saved.id, Some(1));
    }

    #[tokio::test]
    async fn test_update_profile_mismatched_id() {
        let service = create_test_service();
        let mut request = preferences(&["NEWS"]);
        request.id = Some(-1);

        let result = service.update_profile(1, &request).await;
        assert!(matches!(result, Err(ProfileError::IllegalRequestData(_))));

        // the rejected payload must not have reached storage
        assert_eq!(service.profile_repository.write_count().await, 0);
        assert!(service.get_profile(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_without_id_adopts_principal() {
        let service = create_test_service();

        let saved = service
            .update_profile(42, &preferences(&["ASSIGNED"]))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(42));
        let fetched = service.get_profile(42).await.unwrap().unwrap();
        assert!(fetched.mail_notifications.contains("ASSIGNED"));
    }

    #[tokio::test]
    async fn test_update_profile_unknown_categories() {
        let service = create_test_service();

        let saved = service
            .update_profile(1, &preferences(&["NEWS", "CARRIER_PIGEON"]))
            .await
            .unwrap();

        assert_eq!(
            saved.mail_notifications.iter().collect::<Vec<_>>(),
            vec!["NEWS"]
        );
    }

    #[tokio::test]
    async fn test_update_profile_ignores_disabled_set() {
        let service = create_test_service();
        let mut request = preferences(&["NEWS"]);
        request.disabled_notifications = ["ASSIGNED".to_string()].into_iter().collect();

        let saved = service.update_profile(1, &request).await.unwrap();

        // the disabled list is derived output, not input
        assert!(saved.mail_notifications.contains("NEWS"));
        assert!(saved.disabled_notifications.contains("ASSIGNED"));
        assert!(!saved.mail_notifications.contains("ASSIGNED"));
    }

    #[tokio::test]
    async fn test_update_profile_creates_missing_profile() {
        let service = create_test_service();
        assert!(service.get_profile(5).await.unwrap().is_none());

        service.update_profile(5, &preferences(&["OVERDUE"])).await.unwrap();

        let fetched = service.get_profile(5).await.unwrap().unwrap();
        assert!(fetched.mail_notifications.contains("OVERDUE"));
    }

    #[tokio::test]
    async fn test_update_profile_preserves_last_login() {
        let service = create_test_service();
        service.record_login(1).await.unwrap();

        let saved = service.update_profile(1, &preferences(&["NEWS"])).await.unwrap();

        assert!(saved.last_login.is_some());
    }

    #[tokio::test]
    async fn test_update_profile_empty_set_clears_categories() {
        let service = create_test_service();
        service
            .update_profile(1, &preferences(&["NEWS", "MENTIONED"]))
            .await
            .unwrap();

        let saved = service.update_profile(1, &preferences(&[])).await.unwrap();

        assert!(saved.mail_notifications.is_empty());
        assert_eq!(saved.disabled_notifications.len(), MailNotification::ALL.len());
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let service = create_test_service();
        assert!(service.get_profile(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_login_sets_timestamp() {
        let service = create_test_service();

        let stamped = service.record_login(1).await.unwrap();
        assert!(stamped.last_login.is_some());

        let fetched = service.get_profile(1).await.unwrap().unwrap();
        assert_eq!(fetched.last_login, stamped.last_login);
    }

    #[tokio::test]
    async fn test_record_login_preserves_mask() {
        let service = create_test_service();
        service.update_profile(1, &preferences(&["DEADLINE"])).await.unwrap();

        let stamped = service.record_login(1).await.unwrap();

        assert!(stamped.last_login.is_some());
        assert!(stamped.mail_notifications.contains("DEADLINE"));
    }
}
