use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::follows::{FollowStatus, FollowToggleOutcome};
use crate::repositories::follow_repository::FollowRepository;
use crate::utils::errors::app_error::AppError;

/// Trust boundary for all follow-graph mutation. No other code path writes
/// edges or counters.
#[derive(Clone)]
pub struct FollowService {
    follow_repository: Arc<FollowRepository>,
}

impl FollowService {
    pub fn new(follow_repository: Arc<FollowRepository>) -> Self {
        Self { follow_repository }
    }

    /// Flip the follow relationship from `follower_id` to `following_id`.
    /// Calling twice in a row follows then unfollows; that is the contract,
    /// not a bug.
    pub async fn toggle_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<FollowToggleOutcome, AppError> {
        if follower_id == following_id {
            return Err(AppError::SelfFollow);
        }

        let outcome = self
            .follow_repository
            .toggle_follow(follower_id, following_id)
            .await?
            .ok_or(AppError::ConflictingToggle)?;

        match outcome {
            FollowToggleOutcome::Followed { mutual } => {
                info!(%follower_id, %following_id, mutual, "follow created");
            }
            FollowToggleOutcome::Unfollowed => {
                info!(%follower_id, %following_id, "follow removed");
            }
        }

        Ok(outcome)
    }

    /// Read-only status check. Lookup failures are logged and reported as
    /// `Unknown` rather than raised; a missing identifier short-circuits to
    /// `NotFollowing` without querying.
    pub async fn follow_status(
        &self,
        follower_id: Option<Uuid>,
        following_id: Option<Uuid>,
    ) -> FollowStatus {
        let (Some(follower_id), Some(following_id)) = (follower_id, following_id) else {
            return FollowStatus::NotFollowing;
        };

        match self
            .follow_repository
            .edge_exists(follower_id, following_id)
            .await
        {
            Ok(true) => FollowStatus::Following,
            Ok(false) => FollowStatus::NotFollowing,
            Err(err) => {
                warn!(%follower_id, %following_id, error = %err, "follow status lookup failed");
                FollowStatus::Unknown
            }
        }
    }
}
