//! Repository layer for database access

pub mod profile_repository;
pub mod user_repository;

pub use profile_repository::ProfileRepository;
pub use user_repository::UserRepository;
