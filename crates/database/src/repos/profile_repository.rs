//! Profile repository backed by SQLite

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::entities::Profile;
use crate::types::{ProfileError, ProfileResult};

/// Storage operations for per-user profiles.
///
/// Profile rows are created on first write, so every mutation is an upsert
/// keyed on `user_id`.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> ProfileResult<Option<Profile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_profile_row(&r)))
    }

    /// Write the given profile, creating the row if the user has none yet.
    ///
    /// On an existing row only the notification mask is replaced; the stored
    /// `last_login` wins over whatever the caller read earlier.
    pub async fn upsert(&self, profile: &Profile) -> ProfileResult<Profile> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, last_login, mail_notifications, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                mail_notifications = excluded.mail_notifications,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.last_login)
        .bind(profile.mail_notifications)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(user_id = profile.user_id, "stored profile");

        self.find_by_user_id(profile.user_id).await?.ok_or_else(|| {
            ProfileError::DatabaseError("Failed to load profile after upsert".to_string())
        })
    }

    /// Stamp the user's last login, creating the profile row if needed
    pub async fn record_login(&self, user_id: i64) -> ProfileResult<Profile> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, last_login, mail_notifications, updated_at)
            VALUES (?, ?, 0, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                last_login = excluded.last_login,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(user_id, "recorded login");

        self.find_by_user_id(user_id).await?.ok_or_else(|| {
            ProfileError::DatabaseError("Failed to load profile after login".to_string())
        })
    }

    pub async fn list(&self, limit: i64) -> ProfileResult<Vec<Profile>> {
        let rows = sqlx::query("SELECT * FROM profiles ORDER BY user_id LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_profile_row).collect())
    }
}

fn map_profile_row(row: &SqliteRow) -> Profile {
    Profile {
        user_id: row.get("user_id"),
        last_login: row.get("last_login"),
        mail_notifications: row.get("mail_notifications"),
        updated_at: row.get("updated_at"),
    }
}
