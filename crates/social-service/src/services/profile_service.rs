use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::models::profiles::ProfileDetailsResponse;
use crate::models::users::UserSummary;
use crate::repositories::{
    follow_repository::FollowRepository, user_repository::UserRepository,
};
use crate::utils::errors::app_error::AppError;

#[derive(Clone)]
pub struct ProfileService {
    user_repository: Arc<UserRepository>,
    follow_repository: Arc<FollowRepository>,
}

impl ProfileService {
    pub fn new(
        user_repository: Arc<UserRepository>,
        follow_repository: Arc<FollowRepository>,
    ) -> Self {
        Self {
            user_repository,
            follow_repository,
        }
    }

    /// Profile details with the stored counters. When a viewer is supplied
    /// the relationship flags are computed from the edges, failing open to
    /// false so a lookup error never blocks the profile render.
    pub async fn get_profile(
        &self,
        user_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<ProfileDetailsResponse, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let (is_following, is_followed_by) = match viewer_id {
            Some(viewer) if viewer != user_id => (
                self.edge_exists_or_false(viewer, user_id).await,
                self.edge_exists_or_false(user_id, viewer).await,
            ),
            _ => (false, false),
        };

        Ok(ProfileDetailsResponse::from_user(
            user,
            is_following,
            is_followed_by,
        ))
    }

    pub async fn list_followers(&self, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
        let followers = self.user_repository.list_followers(user_id).await?;
        Ok(followers.into_iter().map(UserSummary::from).collect())
    }

    pub async fn list_following(&self, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
        let following = self.user_repository.list_following(user_id).await?;
        Ok(following.into_iter().map(UserSummary::from).collect())
    }

    async fn edge_exists_or_false(&self, follower_id: Uuid, following_id: Uuid) -> bool {
        match self
            .follow_repository
            .edge_exists(follower_id, following_id)
            .await
        {
            Ok(exists) => exists,
            Err(err) => {
                warn!(%follower_id, %following_id, error = %err, "relationship lookup failed");
                false
            }
        }
    }
}
