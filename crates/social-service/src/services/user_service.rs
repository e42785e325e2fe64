use std::sync::Arc;

use uuid::Uuid;

use crate::models::users::{UpsertUser, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::app_error::AppError;

#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn upsert_user(&self, user: UpsertUser) -> Result<UserResponse, AppError> {
        if user.username.trim().is_empty() {
            return Err(AppError::BadRequest("username must not be empty".to_string()));
        }
        let saved = self.user_repository.upsert_user(&user).await?;
        Ok(UserResponse::from(saved))
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserResponse>, sqlx::Error> {
        let user = self.user_repository.find_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }
}
