use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    repositories::{follow_repository::FollowRepository, user_repository::UserRepository},
    services::{
        follow_service::FollowService, profile_service::ProfileService, user_service::UserService,
    },
    settings::Settings,
};

pub struct ServiceContainer {
    pub user_service: Arc<UserService>,
    pub follow_service: Arc<FollowService>,
    pub profile_service: Arc<ProfileService>,
}

impl ServiceContainer {
    pub fn new(settings: &Settings, db: Arc<PgPool>) -> Self {
        let user_repository = Arc::new(UserRepository::new(db.clone()));
        let follow_repository = Arc::new(FollowRepository::new(
            db,
            settings.statement_timeout_ms,
        ));

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let follow_service = Arc::new(FollowService::new(follow_repository.clone()));
        let profile_service = Arc::new(ProfileService::new(user_repository, follow_repository));

        Self {
            user_service,
            follow_service,
            profile_service,
        }
    }
}
