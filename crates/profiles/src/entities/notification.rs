//! Mail notification categories.
//!
//! Subscriptions are stored as a bitmask on the profile row; the wire format
//! speaks in category labels. Each variant owns one bit, so the mask and the
//! label set convert losslessly in both directions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A mail category a user can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MailNotification {
    News,
    Assigned,
    Deadline,
    Overdue,
    Mentioned,
}

impl MailNotification {
    pub const ALL: [MailNotification; 5] = [
        MailNotification::News,
        MailNotification::Assigned,
        MailNotification::Deadline,
        MailNotification::Overdue,
        MailNotification::Mentioned,
    ];

    pub fn bit(self) -> i64 {
        match self {
            MailNotification::News => 1 << 0,
            MailNotification::Assigned => 1 << 1,
            MailNotification::Deadline => 1 << 2,
            MailNotification::Overdue => 1 << 3,
            MailNotification::Mentioned => 1 << 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MailNotification::News => "NEWS",
            MailNotification::Assigned => "ASSIGNED",
            MailNotification::Deadline => "DEADLINE",
            MailNotification::Overdue => "OVERDUE",
            MailNotification::Mentioned => "MENTIONED",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NEWS" => Some(MailNotification::News),
            "ASSIGNED" => Some(MailNotification::Assigned),
            "DEADLINE" => Some(MailNotification::Deadline),
            "OVERDUE" => Some(MailNotification::Overdue),
            "MENTIONED" => Some(MailNotification::Mentioned),
            _ => None,
        }
    }

    /// Labels of the categories set in the given mask
    pub fn labels_from_mask(mask: i64) -> BTreeSet<String> {
        Self::ALL
            .iter()
            .filter(|category| mask & category.bit() != 0)
            .map(|category| category.as_str().to_string())
            .collect()
    }

    /// Build a mask from category labels. Labels that do not name a known
    /// category are ignored.
    pub fn mask_from_labels<I, S>(labels: I) -> i64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .filter_map(|label| Self::from_label(label.as_ref()))
            .fold(0, |mask, category| mask | category.bit())
    }
}
