//! # Taskboard Profiles Crate
//!
//! This crate provides per-user profile functionality for the Taskboard
//! application: mail notification preferences and the last-login stamp.
//!
//! ## Architecture
//!
//! - **Entities**: Notification category catalogue and bitmask mapping
//! - **Services**: Business logic layer over the profile repository
//! - **Types**: Wire representation exchanged with API clients
//! - **Utils**: Request payload checks

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

// Re-export database types and repositories
pub use taskboard_database::{Profile, ProfileError, ProfileRepository, ProfileResult};

// Re-export main types for convenience
pub use entities::MailNotification;
pub use services::{MockProfileRepository, ProfileRepo, ProfileService};
pub use types::ProfileTo;
pub use utils::assure_id_consistent;
