//! Error types for database operations

use thiserror::Error;

/// Errors raised while opening or migrating the database
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionError(String),
    #[error("Migration failed: {0}")]
    MigrationError(String),
    #[error("Query failed: {0}")]
    QueryError(String),
}

/// Errors raised by user storage operations
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already registered")]
    EmailAlreadyExists,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Errors raised by profile storage and profile request handling
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Illegal request data: {0}")]
    IllegalRequestData(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(e: sqlx::Error) -> Self {
        DatabaseError::QueryError(e.to_string())
    }
}

impl From<sqlx::Error> for UserError {
    fn from(e: sqlx::Error) -> Self {
        UserError::DatabaseError(e.to_string())
    }
}

impl From<sqlx::Error> for ProfileError {
    fn from(e: sqlx::Error) -> Self {
        ProfileError::DatabaseError(e.to_string())
    }
}
