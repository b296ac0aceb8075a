//! Profile entity definitions

use serde::{Deserialize, Serialize};

/// Per-user profile, keyed 1:1 to the owning account.
///
/// `last_login` holds an RFC3339 timestamp refreshed on each successful
/// login. `mail_notifications` is a bitmask of subscribed mail categories.
/// Rows are created lazily: an account without a profile row simply has no
/// recorded login and no subscriptions yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub last_login: Option<String>,
    pub mail_notifications: i64,
    pub updated_at: String,
}

impl Profile {
    /// Fresh profile with no recorded login and nothing subscribed
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            last_login: None,
            mail_notifications: 0,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_starts_unsubscribed() {
        let profile = Profile::new(42);
        assert_eq!(profile.user_id, 42);
        assert_eq!(profile.mail_notifications, 0);
        assert!(profile.last_login.is_none());
        assert!(!profile.updated_at.is_empty());
    }
}
