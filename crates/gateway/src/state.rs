use std::sync::Arc;

use taskboard_auth::{AuthSession, Authenticator, User};
use taskboard_database::ProfileRepository;
use taskboard_profiles::ProfileService;

use crate::ApiError;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct GatewayState {
    authenticator: Authenticator,
    profiles: Arc<ProfileService<ProfileRepository>>,
}

impl GatewayState {
    pub fn new(
        authenticator: Authenticator,
        profiles: Arc<ProfileService<ProfileRepository>>,
    ) -> Self {
        Self {
            authenticator,
            profiles,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn profiles(&self) -> &ProfileService<ProfileRepository> {
        &self.profiles
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }
}
