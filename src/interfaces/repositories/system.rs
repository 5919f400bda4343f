use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{
        search::SearchResults,
        system::{HealthReport, MaintenanceToggle, SystemStatus},
        upload::UploadedFile,
    },
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiSystemRepo,
};

#[async_trait]
pub trait SystemRepository: Send + Sync {
    async fn status(&self) -> Result<SystemStatus, AppError>;
    async fn health(&self) -> Result<HealthReport, AppError>;
    async fn set_maintenance(&self, toggle: &MaintenanceToggle) -> Result<SystemStatus, AppError>;
    async fn search(&self, query: &str) -> Result<SearchResults, AppError>;
    async fn upload(&self, file_name: &str, bytes: &[u8], mime_type: &str) -> Result<UploadedFile, AppError>;
}

impl ApiSystemRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiSystemRepo { client }
    }
}

#[async_trait]
impl SystemRepository for ApiSystemRepo {
    async fn status(&self) -> Result<SystemStatus, AppError> {
        Ok(self.client.get("/system/status").await?)
    }

    async fn health(&self) -> Result<HealthReport, AppError> {
        Ok(self.client.get("/system/health").await?)
    }

    async fn set_maintenance(&self, toggle: &MaintenanceToggle) -> Result<SystemStatus, AppError> {
        Ok(self.client.post("/system/maintenance", toggle).await?)
    }

    async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        Ok(self.client.get_query("/search", &[("q", query)]).await?)
    }

    async fn upload(&self, file_name: &str, bytes: &[u8], mime_type: &str) -> Result<UploadedFile, AppError> {
        Ok(self.client.upload("/upload", file_name, bytes, mime_type).await?)
    }
}
