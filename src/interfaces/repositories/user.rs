use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{
        token::AuthResponse,
        user::{LoginUser, MessageResponse, NewUser, User},
    },
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiUserRepo,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn login(&self, credentials: &LoginUser) -> Result<AuthResponse, AppError>;
    async fn register(&self, new_user: &NewUser) -> Result<MessageResponse, AppError>;
    async fn logout(&self) -> Result<(), AppError>;
    async fn me(&self) -> Result<User, AppError>;
}

impl ApiUserRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiUserRepo { client }
    }
}

#[async_trait]
impl UserRepository for ApiUserRepo {
    async fn login(&self, credentials: &LoginUser) -> Result<AuthResponse, AppError> {
        Ok(self.client.post("/auth/login", credentials).await?)
    }

    async fn register(&self, new_user: &NewUser) -> Result<MessageResponse, AppError> {
        Ok(self.client.post("/auth/register", new_user).await?)
    }

    async fn logout(&self) -> Result<(), AppError> {
        Ok(self.client.post_empty("/auth/logout").await?)
    }

    async fn me(&self) -> Result<User, AppError> {
        Ok(self.client.get("/auth/me").await?)
    }
}
