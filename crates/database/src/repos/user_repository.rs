//! User repository backed by SQLite

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::entities::{CreateUserRequest, User, UserRole};
use crate::types::{UserError, UserResult};

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

/// Storage operations for user accounts, keyed by the numeric row id
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return the stored row
    pub async fn create(&self, request: CreateUserRequest) -> UserResult<User> {
        let public_id = CUID.create_id();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO users (public_id, email, password_hash, first_name, last_name, display_name, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&public_id)
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.display_name)
        .bind(request.role.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed: users.email") {
                UserError::EmailAlreadyExists
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        let id = result.last_insert_rowid();
        debug!(user_id = id, "created user");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| UserError::DatabaseError("Failed to load user after insert".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_user_row(&r)))
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_user_row(&r)))
    }

    pub async fn list(&self, limit: i64) -> UserResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_user_row).collect())
    }

    pub async fn count(&self) -> UserResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }
}

fn map_user_row(row: &SqliteRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        public_id: row.get("public_id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        display_name: row.get("display_name"),
        role: UserRole::from(role.as_str()),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory pool");
        crate::migrations::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    fn sample_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password_hash: "argon2-hash".to_string(),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            display_name: "johnd".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_id() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo
            .create(sample_request("test@example.com"))
            .await
            .expect("Failed to create user");
        assert!(user.id > 0);
        assert!(!user.public_id.is_empty());
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert_eq!(user.role, UserRole::User);
        assert!(!user.created_at.is_empty());

        let found = repo
            .find_by_id(user.id)
            .await
            .expect("Lookup failed")
            .expect("User should exist");
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool);

        repo.create(sample_request("dup@example.com"))
            .await
            .expect("First create should succeed");
        let err = repo
            .create(sample_request("dup@example.com"))
            .await
            .expect_err("Second create should fail");
        assert!(matches!(err, UserError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn find_by_email_returns_none_for_unknown() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool);

        let found = repo
            .find_by_email("ghost@example.com")
            .await
            .expect("Lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn role_survives_a_round_trip() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool);

        let mut request = sample_request("admin@example.com");
        request.role = UserRole::Admin;
        let user = repo.create(request).await.expect("Failed to create admin");

        let found = repo
            .find_by_id(user.id)
            .await
            .expect("Lookup failed")
            .expect("User should exist");
        assert_eq!(found.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn list_and_count_reflect_inserts() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool);

        assert_eq!(repo.count().await.expect("Count failed"), 0);
        repo.create(sample_request("a@example.com"))
            .await
            .expect("Create failed");
        repo.create(sample_request("b@example.com"))
            .await
            .expect("Create failed");

        assert_eq!(repo.count().await.expect("Count failed"), 2);
        let users = repo.list(10).await.expect("List failed");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "a@example.com");

        let limited = repo.list(1).await.expect("List failed");
        assert_eq!(limited.len(), 1);
    }
}
