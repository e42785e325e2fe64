use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    models::profiles::ProfileDetailsResponse,
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

pub const TAG: &str = "profiles";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub viewer_id: Option<Uuid>,
}

/// Get designer profile details by user id
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}",
    operation_id = "getProfile",
    responses(
        (status = 200, description = "Profile details retrieved successfully", body = ProfileDetailsResponse),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("viewerId" = Option<Uuid>, Query, description = "Authenticated viewer ID")
    )
)]
pub(super) async fn get_profile(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ProfileQuery>,
) -> Result<(StatusCode, Json<ProfileDetailsResponse>), AppError> {
    let profile = app_state
        .profile_service
        .get_profile(user_id, query.viewer_id)
        .await?;
    Ok((StatusCode::OK, Json(profile)))
}
