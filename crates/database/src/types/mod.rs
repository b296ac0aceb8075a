//! Shared result and error types

pub mod errors;

pub use errors::{DatabaseError, ProfileError, UserError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type UserResult<T> = Result<T, UserError>;
pub type ProfileResult<T> = Result<T, ProfileError>;
