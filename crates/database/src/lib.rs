//! Taskboard Database Crate
//!
//! Connection management, migrations, and the repositories for user accounts
//! and their profiles.

use sqlx::SqlitePool;
use taskboard_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};

pub use repos::{ProfileRepository, UserRepository};

pub use entities::{
    profile::Profile,
    user::{CreateUserRequest, User, UserRole},
};

pub use types::{
    errors::{DatabaseError, ProfileError, UserError},
    DatabaseResult, ProfileResult, UserResult,
};

/// Open the configured database and bring the schema up to date
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
