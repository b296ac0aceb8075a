pub mod mock_repositories;
pub mod profile_service;

pub use mock_repositories::MockProfileRepository;
pub use profile_service::{ProfileRepo, ProfileService};
