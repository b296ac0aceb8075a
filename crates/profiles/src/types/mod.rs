pub mod transfer;

pub use taskboard_database::{ProfileError, ProfileResult};
pub use transfer::ProfileTo;
