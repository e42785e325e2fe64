use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::users::User;

/// Designer profile as rendered on the profile surface. Counter values are
/// the stored denormalized integers, not derived counts.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetailsResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub specialty: Option<String>,
    pub verified: bool,
    pub followers_count: i64,
    pub following_count: i64,
    /// True when the viewer follows this profile. Absent viewer reads false.
    pub is_following: bool,
    /// True when this profile follows the viewer back.
    pub is_followed_by: bool,
}

impl ProfileDetailsResponse {
    pub fn from_user(user: User, is_following: bool, is_followed_by: bool) -> Self {
        ProfileDetailsResponse {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            specialty: user.specialty,
            verified: user.verified,
            followers_count: user.followers_count,
            following_count: user.following_count,
            is_following,
            is_followed_by,
        }
    }
}
