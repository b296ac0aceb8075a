//! Domain entities stored in the database

pub mod profile;
pub mod user;

pub use profile::Profile;
pub use user::{CreateUserRequest, User, UserRole};
