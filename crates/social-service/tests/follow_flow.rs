//! Database-backed follow-graph scenarios.
//!
//! These tests need a running Postgres with `migrations/0001_social_graph.sql`
//! applied. Point `DATABASE_URL` at it and run `cargo test -- --ignored`.

use std::sync::Arc;

use atelier_social_service::models::follows::{FollowStatus, FollowToggleOutcome};
use atelier_social_service::models::users::UpsertUser;
use atelier_social_service::repositories::follow_repository::FollowRepository;
use atelier_social_service::repositories::user_repository::UserRepository;
use atelier_social_service::services::follow_service::FollowService;
use atelier_social_service::utils::errors::app_error::AppError;
use sqlx::PgPool;
use uuid::Uuid;

struct Harness {
    pool: Arc<PgPool>,
    users: UserRepository,
    follows: Arc<FollowRepository>,
    service: FollowService,
}

async fn harness() -> Harness {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a Postgres with the social schema");
    let pool = Arc::new(PgPool::connect(&url).await.expect("database connection"));
    let follows = Arc::new(FollowRepository::new(pool.clone(), Some(5_000)));
    Harness {
        users: UserRepository::new(pool.clone()),
        service: FollowService::new(follows.clone()),
        follows,
        pool,
    }
}

async fn seed_user(users: &UserRepository) -> Uuid {
    let id = Uuid::new_v4();
    users
        .upsert_user(&UpsertUser {
            id,
            username: format!("designer-{}", id),
            display_name: None,
            avatar_url: None,
            bio: None,
            specialty: None,
        })
        .await
        .expect("seed user");
    id
}

async fn counters(pool: &PgPool, id: Uuid) -> (i64, i64) {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT followers_count, following_count FROM social.users WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .expect("counters")
}

async fn edge_rows(pool: &PgPool, follower: Uuid, following: Uuid) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM social.follows WHERE follower_id = $1 AND following_id = $2",
    )
    .bind(follower)
    .bind(following)
    .fetch_one(pool)
    .await
    .expect("edge count")
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn follow_mutual_unfollow_keeps_flags_and_counters_consistent() {
    let h = harness().await;
    let a = seed_user(&h.users).await;
    let b = seed_user(&h.users).await;

    // A follows B: fresh edge, not mutual, both counters move by one.
    let outcome = h.service.toggle_follow(a, b).await.unwrap();
    assert_eq!(outcome, FollowToggleOutcome::Followed { mutual: false });
    let edge = h.follows.find_edge(a, b).await.unwrap().unwrap();
    assert!(!edge.mutual);
    assert_eq!(counters(&h.pool, a).await, (0, 1));
    assert_eq!(counters(&h.pool, b).await, (1, 0));

    // B follows back: both directions flip to mutual.
    let outcome = h.service.toggle_follow(b, a).await.unwrap();
    assert_eq!(outcome, FollowToggleOutcome::Followed { mutual: true });
    assert!(h.follows.find_edge(a, b).await.unwrap().unwrap().mutual);
    assert!(h.follows.find_edge(b, a).await.unwrap().unwrap().mutual);
    assert_eq!(counters(&h.pool, a).await, (1, 1));
    assert_eq!(counters(&h.pool, b).await, (1, 1));

    // A unfollows: edge gone, reverse edge no longer mutual, counters drop.
    let outcome = h.service.toggle_follow(a, b).await.unwrap();
    assert_eq!(outcome, FollowToggleOutcome::Unfollowed);
    assert!(h.follows.find_edge(a, b).await.unwrap().is_none());
    assert!(!h.follows.find_edge(b, a).await.unwrap().unwrap().mutual);
    assert_eq!(counters(&h.pool, a).await, (1, 0));
    assert_eq!(counters(&h.pool, b).await, (0, 1));
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn toggle_twice_restores_the_starting_state() {
    let h = harness().await;
    let a = seed_user(&h.users).await;
    let b = seed_user(&h.users).await;

    let before_a = counters(&h.pool, a).await;
    let before_b = counters(&h.pool, b).await;

    h.service.toggle_follow(a, b).await.unwrap();
    h.service.toggle_follow(a, b).await.unwrap();

    assert_eq!(edge_rows(&h.pool, a, b).await, 0);
    assert_eq!(counters(&h.pool, a).await, before_a);
    assert_eq!(counters(&h.pool, b).await, before_b);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn self_follow_fails_without_writing() {
    let h = harness().await;
    let a = seed_user(&h.users).await;

    let err = h.service.toggle_follow(a, a).await.unwrap_err();
    assert!(matches!(err, AppError::SelfFollow));
    assert_eq!(edge_rows(&h.pool, a, a).await, 0);
    assert_eq!(counters(&h.pool, a).await, (0, 0));
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn status_query_tracks_the_toggle() {
    let h = harness().await;
    let a = seed_user(&h.users).await;
    let b = seed_user(&h.users).await;

    assert_eq!(
        h.service.follow_status(Some(a), Some(b)).await,
        FollowStatus::NotFollowing
    );

    h.service.toggle_follow(a, b).await.unwrap();
    assert_eq!(
        h.service.follow_status(Some(a), Some(b)).await,
        FollowStatus::Following
    );
    // Directionality: B does not follow A.
    assert_eq!(
        h.service.follow_status(Some(b), Some(a)).await,
        FollowStatus::NotFollowing
    );

    h.service.toggle_follow(a, b).await.unwrap();
    assert_eq!(
        h.service.follow_status(Some(a), Some(b)).await,
        FollowStatus::NotFollowing
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn concurrent_toggles_never_double_apply() {
    let h = harness().await;
    let a = seed_user(&h.users).await;
    let b = seed_user(&h.users).await;

    let first = h.service.toggle_follow(a, b);
    let second = h.service.toggle_follow(a, b);
    let (first, second) = tokio::join!(first, second);

    // Outcomes depend on interleaving: the calls may serialize into a
    // follow+unfollow, or the insert race loser reports the conflict. In
    // every case the settled counters must equal edge reality.
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(
                err,
                AppError::ConflictingToggle | AppError::DatabaseError(_)
            ));
        }
    }

    let edges = edge_rows(&h.pool, a, b).await;
    assert!(edges <= 1);
    let (_, a_following) = counters(&h.pool, a).await;
    let (b_followers, _) = counters(&h.pool, b).await;
    assert_eq!(a_following, edges);
    assert_eq!(b_followers, edges);
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn unfollow_floors_drifted_counters_at_zero() {
    let h = harness().await;
    let a = seed_user(&h.users).await;
    let b = seed_user(&h.users).await;

    h.service.toggle_follow(a, b).await.unwrap();

    // Simulate drift from a legacy non-transactional writer.
    sqlx::query("UPDATE social.users SET following_count = 0 WHERE id = $1")
        .bind(a)
        .execute(h.pool.as_ref())
        .await
        .unwrap();
    sqlx::query("UPDATE social.users SET followers_count = 0 WHERE id = $1")
        .bind(b)
        .execute(h.pool.as_ref())
        .await
        .unwrap();

    h.service.toggle_follow(a, b).await.unwrap();

    assert_eq!(counters(&h.pool, a).await.1, 0);
    assert_eq!(counters(&h.pool, b).await.0, 0);
}
