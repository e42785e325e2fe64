use std::sync::Arc;

use anyhow::Result;
use apis::setup_routes;
use axum::Router;
use container::ServiceContainer;
use services::{
    follow_service::FollowService, profile_service::ProfileService, user_service::UserService,
};
use sqlx::postgres::PgPool;
use tower_http::cors::CorsLayer;

pub mod apis;
pub mod container;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;

pub struct AppState {
    pub user_service: Arc<UserService>,
    pub follow_service: Arc<FollowService>,
    pub profile_service: Arc<ProfileService>,
}

pub async fn setup_database(database_url: &str) -> Result<Arc<PgPool>, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    Ok(Arc::new(pool))
}

pub async fn setup_router(settings: &settings::Settings) -> Result<Router> {
    let db = setup_database(&settings.database_url).await?;
    let container = ServiceContainer::new(settings, db);
    let router = setup_routes();

    Ok(router
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(AppState {
            user_service: container.user_service,
            follow_service: container.follow_service,
            profile_service: container.profile_service,
        })))
}

pub fn init_tracing(settings: &settings::Settings) {
    let env = settings.environment.clone().unwrap_or("DEV".to_string());
    let level = match env.as_str() {
        "PROD" => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(env != "PROD")
        .init();
}
