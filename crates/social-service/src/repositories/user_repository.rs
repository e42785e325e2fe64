use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::users::{UpsertUser, User};

pub struct UserRepository {
    db: Arc<PgPool>,
}

impl UserRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        UserRepository { db }
    }

    /// Create-or-update the profile record at signup. The counter columns
    /// are owned by the follow toggle and are left untouched on conflict.
    pub async fn upsert_user(&self, user: &UpsertUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO social.users (id, username, display_name, avatar_url, bio, specialty)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                 username = EXCLUDED.username,
                 display_name = EXCLUDED.display_name,
                 avatar_url = EXCLUDED.avatar_url,
                 bio = EXCLUDED.bio,
                 specialty = EXCLUDED.specialty
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(&user.bio)
        .bind(&user.specialty)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM social.users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn list_followers(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        let query = r#"
        SELECT u.*
        FROM social.users u
        INNER JOIN social.follows f ON u.id = f.follower_id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        "#;
        sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    pub async fn list_following(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        let query = r#"
        SELECT u.*
        FROM social.users u
        INNER JOIN social.follows f ON u.id = f.following_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        "#;
        sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await
    }
}
