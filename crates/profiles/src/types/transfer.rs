//! Wire representation of a user profile.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use taskboard_database::Profile;

use crate::entities::MailNotification;

/// Profile view exchanged with clients.
///
/// Outbound, `mail_notifications` carries the subscribed category labels and
/// `disabled_notifications` the remaining ones, so clients can render both
/// lists without knowing the category catalogue. Inbound, only `id` and
/// `mail_notifications` are meaningful; the disabled set is derived state and
/// ignored, as are labels that do not name a known category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub mail_notifications: BTreeSet<String>,
    #[serde(default)]
    pub disabled_notifications: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl ProfileTo {
    /// Overwrite the stored subscription mask with the submitted label set
    pub fn apply_to(&self, profile: &mut Profile) {
        profile.mail_notifications = MailNotification::mask_from_labels(&self.mail_notifications);
    }
}

impl From<&Profile> for ProfileTo {
    fn from(profile: &Profile) -> Self {
        let mut enabled = BTreeSet::new();
        let mut disabled = BTreeSet::new();
        for category in MailNotification::ALL {
            let label = category.as_str().to_string();
            if profile.mail_notifications & category.bit() != 0 {
                enabled.insert(label);
            } else {
                disabled.insert(label);
            }
        }

        Self {
            id: Some(profile.user_id),
            mail_notifications: enabled,
            disabled_notifications: disabled,
            last_login: profile.last_login.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_mask(mask: i64) -> Profile {
        let mut profile = Profile::new(7);
        profile.mail_notifications = mask;
        profile
    }

    #[test]
    fn from_profile_splits_categories_into_enabled_and_disabled() {
        let mut profile = profile_with_mask(MailNotification::News.bit());
        profile.last_login = Some("2024-05-01T10:00:00+00:00".to_string());

        let transfer = ProfileTo::from(&profile);

        assert_eq!(transfer.id, Some(7));
        assert_eq!(
            transfer.mail_notifications.iter().collect::<Vec<_>>(),
            vec!["NEWS"]
        );
        assert_eq!(transfer.disabled_notifications.len(), 4);
        assert!(!transfer.disabled_notifications.contains("NEWS"));
        assert_eq!(
            transfer.last_login.as_deref(),
            Some("2024-05-01T10:00:00+00:00")
        );
    }

    #[test]
    fn apply_to_replaces_the_mask_and_ignores_unknown_labels() {
        let mut profile = profile_with_mask(MailNotification::Overdue.bit());

        let transfer = ProfileTo {
            id: Some(7),
            mail_notifications: ["NEWS".to_string(), "BOGUS".to_string()]
                .into_iter()
                .collect(),
            disabled_notifications: BTreeSet::new(),
            last_login: None,
        };
        transfer.apply_to(&mut profile);

        assert_eq!(profile.mail_notifications, MailNotification::News.bit());
    }

    #[test]
    fn apply_to_does_not_touch_last_login() {
        let mut profile = profile_with_mask(0);
        profile.last_login = Some("2024-05-01T10:00:00+00:00".to_string());

        let transfer = ProfileTo {
            id: None,
            mail_notifications: BTreeSet::new(),
            disabled_notifications: BTreeSet::new(),
            last_login: None,
        };
        transfer.apply_to(&mut profile);

        assert!(profile.last_login.is_some());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let profile = profile_with_mask(MailNotification::News.bit());
        let transfer = ProfileTo::from(&profile);

        let json = serde_json::to_value(&transfer).expect("serialization failed");
        assert_eq!(json["id"], 7);
        assert_eq!(json["mailNotifications"][0], "NEWS");
        assert!(json["disabledNotifications"].is_array());
        assert!(
            json.get("lastLogin").is_none(),
            "absent login stamp should be omitted"
        );
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let transfer: ProfileTo =
            serde_json::from_str(r#"{"mailNotifications":["ASSIGNED"]}"#).expect("parse failed");

        assert_eq!(transfer.id, None);
        assert!(transfer.mail_notifications.contains("ASSIGNED"));
        assert!(transfer.disabled_notifications.is_empty());
        assert_eq!(transfer.last_login, None);
    }
}
