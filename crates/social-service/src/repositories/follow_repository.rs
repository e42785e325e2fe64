use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::follows::{FollowEdge, FollowToggleOutcome};

pub struct FollowRepository {
    db: Arc<PgPool>,
    statement_timeout_ms: Option<u64>,
}

impl FollowRepository {
    pub fn new(db: Arc<PgPool>, statement_timeout_ms: Option<u64>) -> Self {
        FollowRepository {
            db,
            statement_timeout_ms,
        }
    }

    /// Flip the follow state from `follower_id` to `following_id`.
    ///
    /// The whole read-check-then-write sequence runs in one transaction.
    /// Both edge rows are pinned with FOR UPDATE so the mutual flag and the
    /// counters cannot drift between the check and the writes; the composite
    /// unique index backstops edge creation against concurrent inserts.
    ///
    /// Returns `None` when a racing toggle inserted the edge first; the
    /// transaction is rolled back and nothing has been applied.
    pub async fn toggle_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Option<FollowToggleOutcome>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        if let Some(ms) = self.statement_timeout_ms {
            // SET LOCAL scopes the timeout to this transaction; expiry
            // aborts it and surfaces as a retryable database error.
            sqlx::query(&format!("SET LOCAL statement_timeout = {}", ms))
                .execute(&mut *tx)
                .await?;
        }

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM social.follows WHERE follower_id = $1 AND following_id = $2 FOR UPDATE",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(&mut *tx)
        .await?;

        let reverse: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM social.follows WHERE follower_id = $1 AND following_id = $2 FOR UPDATE",
        )
        .bind(following_id)
        .bind(follower_id)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match existing {
            Some(edge_id) => {
                sqlx::query("DELETE FROM social.follows WHERE id = $1")
                    .bind(edge_id)
                    .execute(&mut *tx)
                    .await?;

                if let Some(reverse_id) = reverse {
                    sqlx::query("UPDATE social.follows SET mutual = FALSE WHERE id = $1")
                        .bind(reverse_id)
                        .execute(&mut *tx)
                        .await?;
                }

                sqlx::query(
                    "UPDATE social.users SET following_count = GREATEST(following_count - 1, 0) WHERE id = $1",
                )
                .bind(follower_id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    "UPDATE social.users SET followers_count = GREATEST(followers_count - 1, 0) WHERE id = $1",
                )
                .bind(following_id)
                .execute(&mut *tx)
                .await?;

                FollowToggleOutcome::Unfollowed
            }
            None => {
                let mutual = reverse.is_some();

                let inserted: Option<Uuid> = sqlx::query_scalar(
                    "INSERT INTO social.follows (id, follower_id, following_id, mutual, created_at)
                     VALUES ($1, $2, $3, $4, $5)
                     ON CONFLICT (follower_id, following_id) DO NOTHING
                     RETURNING id",
                )
                .bind(Uuid::new_v4())
                .bind(follower_id)
                .bind(following_id)
                .bind(mutual)
                .bind(Utc::now())
                .fetch_optional(&mut *tx)
                .await?;

                if inserted.is_none() {
                    tx.rollback().await?;
                    return Ok(None);
                }

                if let Some(reverse_id) = reverse {
                    sqlx::query("UPDATE social.follows SET mutual = TRUE WHERE id = $1")
                        .bind(reverse_id)
                        .execute(&mut *tx)
                        .await?;
                }

                sqlx::query(
                    "UPDATE social.users SET following_count = following_count + 1 WHERE id = $1",
                )
                .bind(follower_id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    "UPDATE social.users SET followers_count = followers_count + 1 WHERE id = $1",
                )
                .bind(following_id)
                .execute(&mut *tx)
                .await?;

                FollowToggleOutcome::Followed { mutual }
            }
        };

        tx.commit().await?;
        Ok(Some(outcome))
    }

    pub async fn edge_exists(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM social.follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_edge(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Option<FollowEdge>, sqlx::Error> {
        sqlx::query_as::<_, FollowEdge>(
            "SELECT id, follower_id, following_id, mutual, created_at
             FROM social.follows
             WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(self.db.as_ref())
        .await
    }
}
