use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::follows::{FollowStatus, FollowToggleOutcome},
    models::users::{UpsertUser, UserResponse, UserSummary},
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "users";

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowToggleBody {
    pub follower_id: Uuid,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowToggleResponse {
    /// True when the toggle ended in the following state.
    pub followed: bool,
    /// True when the relationship is now mutual. Always false after an
    /// unfollow.
    pub mutual: bool,
}

impl From<FollowToggleOutcome> for FollowToggleResponse {
    fn from(outcome: FollowToggleOutcome) -> Self {
        match outcome {
            FollowToggleOutcome::Followed { mutual } => FollowToggleResponse {
                followed: true,
                mutual,
            },
            FollowToggleOutcome::Unfollowed => FollowToggleResponse {
                followed: false,
                mutual: false,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusQuery {
    pub follower_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    /// Collapsed boolean for the UI; `unknown` reads as false.
    pub followed: bool,
    pub status: FollowStatus,
}

/// Toggle the follow relationship towards a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/{id}/follow",
    operation_id = "toggleFollow",
    responses(
        (status = 200, description = "Follow state flipped", body = FollowToggleResponse),
        (status = 400, description = "Self-follow attempt", body = ErrorPayload),
        (status = 409, description = "Concurrent toggle, retry", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID to follow or unfollow")
    ),
    request_body = FollowToggleBody
)]
pub(super) async fn toggle_follow(
    State(app_state): State<Arc<AppState>>,
    Path(following_id): Path<Uuid>,
    Json(body): Json<FollowToggleBody>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state
        .follow_service
        .toggle_follow(body.follower_id, following_id)
        .await?;
    Ok((StatusCode::OK, Json(FollowToggleResponse::from(outcome))))
}

/// Check whether a user follows another
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/follow-status",
    operation_id = "getFollowStatus",
    responses(
        (status = 200, description = "Current follow status", body = FollowStatusResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Target user ID"),
        ("followerId" = Option<Uuid>, Query, description = "Acting user ID")
    )
)]
pub(super) async fn follow_status(
    State(app_state): State<Arc<AppState>>,
    Path(following_id): Path<Uuid>,
    Query(query): Query<FollowStatusQuery>,
) -> impl IntoResponse {
    let status = app_state
        .follow_service
        .follow_status(query.follower_id, Some(following_id))
        .await;
    (
        StatusCode::OK,
        Json(FollowStatusResponse {
            followed: status.is_following(),
            status,
        }),
    )
}

/// Get followers of a user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/followers",
    operation_id = "getFollowers",
    responses(
        (status = 200, description = "List of followers", body = Vec<UserSummary>),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_followers(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let followers = app_state
        .profile_service
        .list_followers(user_id)
        .await
        .map_err(AppError::DatabaseError)?;
    Ok((StatusCode::OK, Json(followers)))
}

/// Get users a user follows
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/following",
    operation_id = "getFollowing",
    responses(
        (status = 200, description = "List of followed users", body = Vec<UserSummary>),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_following(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let following = app_state
        .profile_service
        .list_following(user_id)
        .await
        .map_err(AppError::DatabaseError)?;
    Ok((StatusCode::OK, Json(following)))
}

/// Get a user record by id
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}",
    operation_id = "getUser",
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_user(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .get_user(user_id)
        .await
        .map_err(AppError::DatabaseError)?
        .ok_or(AppError::UserNotFound)?;
    Ok(user)
}

/// Create or update a user record at signup
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "upsertUser",
    responses(
        (status = 200, description = "User saved", body = UserResponse),
        (status = 400, description = "Invalid user payload", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    request_body = UpsertUser
)]
pub(super) async fn upsert_user(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<UpsertUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.upsert_user(body).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_response_reports_both_sides() {
        let followed =
            FollowToggleResponse::from(FollowToggleOutcome::Followed { mutual: true });
        assert!(followed.followed && followed.mutual);

        let unfollowed = FollowToggleResponse::from(FollowToggleOutcome::Unfollowed);
        assert!(!unfollowed.followed && !unfollowed.mutual);
    }

    #[test]
    fn toggle_body_uses_camel_case() {
        let body: FollowToggleBody =
            serde_json::from_str(r#"{"followerId":"9f8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d"}"#)
                .unwrap();
        assert_eq!(
            body.follower_id.to_string(),
            "9f8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d"
        );
    }

    #[test]
    fn status_response_carries_tri_state() {
        let json = serde_json::to_value(FollowStatusResponse {
            followed: false,
            status: FollowStatus::Unknown,
        })
        .unwrap();
        assert_eq!(json["followed"], false);
        assert_eq!(json["status"], "unknown");
    }
}
