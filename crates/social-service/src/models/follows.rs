use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A directed follow edge. At most one row exists per ordered pair,
/// enforced by the composite unique index on (follower_id, following_id).
#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize)]
pub struct FollowEdge {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub mutual: bool,
    pub created_at: DateTime<Utc>,
}

/// What a toggle call did. Two calls in a row invert each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowToggleOutcome {
    Followed { mutual: bool },
    Unfollowed,
}

/// Result of a follow-status lookup. `Unknown` means the lookup itself
/// failed; the HTTP layer collapses it to "not following" so the UI is
/// never blocked, but callers that care can still tell the cases apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FollowStatus {
    Following,
    NotFollowing,
    Unknown,
}

impl FollowStatus {
    /// Collapsed boolean for UI consumption. `Unknown` reads as false.
    pub fn is_following(self) -> bool {
        matches!(self, FollowStatus::Following)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FollowStatus::Following => "following",
            FollowStatus::NotFollowing => "notFollowing",
            FollowStatus::Unknown => "unknown",
        }
    }
}
