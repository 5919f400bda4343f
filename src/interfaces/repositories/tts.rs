use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::tts::{TtsJob, TtsJobCreated, TtsRequest},
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::{segment, ApiTtsRepo},
};

#[async_trait]
pub trait TtsRepository: Send + Sync {
    async fn generate(&self, request: &TtsRequest) -> Result<TtsJobCreated, AppError>;
    async fn job_status(&self, job_id: &str) -> Result<TtsJob, AppError>;
}

impl ApiTtsRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiTtsRepo { client }
    }
}

#[async_trait]
impl TtsRepository for ApiTtsRepo {
    async fn generate(&self, request: &TtsRequest) -> Result<TtsJobCreated, AppError> {
        Ok(self.client.post("/tts/generate", request).await?)
    }

    async fn job_status(&self, job_id: &str) -> Result<TtsJob, AppError> {
        Ok(self.client.get(&format!("/tts/status/{}", segment(job_id))).await?)
    }
}
