//! Profile endpoints: read and update the current user's preferences

use std::collections::BTreeSet;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_profiles::ProfileTo;
use utoipa::ToSchema;

use crate::{middleware::AuthUser, ApiError, GatewayState};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub mail_notifications: BTreeSet<String>,
    pub disabled_notifications: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl ProfileResponse {
    fn new(principal_id: i64, transfer: ProfileTo) -> Self {
        Self {
            id: transfer.id.unwrap_or(principal_id),
            mail_notifications: transfer.mail_notifications,
            disabled_notifications: transfer.disabled_notifications,
            last_login: transfer.last_login,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub mail_notifications: BTreeSet<String>,
    #[serde(default)]
    pub disabled_notifications: BTreeSet<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl UpdateProfileRequest {
    fn into_transfer(self) -> ProfileTo {
        ProfileTo {
            id: self.id,
            mail_notifications: self.mail_notifications,
            disabled_notifications: self.disabled_notifications,
            last_login: self.last_login,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Saved preferences, or an empty body when none were saved yet", body = ProfileResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_profile(
    State(state): State<GatewayState>,
    Extension(principal): Extension<AuthUser>,
) -> Result<Response, ApiError> {
    let profile = state.profiles().get_profile(principal.id).await?;

    // no saved preferences is not an error: 200 with an empty body
    Ok(match profile {
        Some(transfer) => Json(ProfileResponse::new(principal.id, transfer)).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profile",
    security(("bearerAuth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Preferences replaced", body = ProfileResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 422, description = "Payload id does not belong to the caller", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<GatewayState>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let transfer = payload.into_transfer();
    let saved = state
        .profiles()
        .update_profile(principal.id, &transfer)
        .await?;

    Ok(Json(ProfileResponse::new(principal.id, saved)))
}
