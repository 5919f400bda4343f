use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{
        mfa::{MfaCode, MfaSetup},
        user::MessageResponse,
    },
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiSecurityRepo,
};

#[async_trait]
pub trait SecurityRepository: Send + Sync {
    async fn setup_mfa(&self) -> Result<MfaSetup, AppError>;
    async fn enable_mfa(&self, code: &MfaCode) -> Result<MessageResponse, AppError>;
    async fn disable_mfa(&self, code: &MfaCode) -> Result<MessageResponse, AppError>;
}

impl ApiSecurityRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiSecurityRepo { client }
    }
}

#[async_trait]
impl SecurityRepository for ApiSecurityRepo {
    async fn setup_mfa(&self) -> Result<MfaSetup, AppError> {
        Ok(self.client.post("/auth/mfa/setup", &serde_json::json!({})).await?)
    }

    async fn enable_mfa(&self, code: &MfaCode) -> Result<MessageResponse, AppError> {
        Ok(self.client.post("/auth/mfa/enable", code).await?)
    }

    async fn disable_mfa(&self, code: &MfaCode) -> Result<MessageResponse, AppError> {
        Ok(self.client.post("/auth/mfa/disable", code).await?)
    }
}
