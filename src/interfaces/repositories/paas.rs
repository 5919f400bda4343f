use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::paas_project::{NewPaasProject, PaasProject, UpdatePaasProject},
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiPaasRepo,
};

#[async_trait]
pub trait PaasRepository: Send + Sync {
    async fn create_project(&self, project: &NewPaasProject) -> Result<PaasProject, AppError>;
    async fn get_projects(&self) -> Result<Vec<PaasProject>, AppError>;
    async fn get_project(&self, id: i64) -> Result<PaasProject, AppError>;
    async fn update_project(&self, id: i64, project: &UpdatePaasProject) -> Result<PaasProject, AppError>;
    async fn delete_project(&self, id: i64) -> Result<(), AppError>;
    async fn start_project(&self, id: i64) -> Result<(), AppError>;
    async fn stop_project(&self, id: i64) -> Result<(), AppError>;
}

impl ApiPaasRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiPaasRepo { client }
    }
}

#[async_trait]
impl PaasRepository for ApiPaasRepo {
    async fn create_project(&self, project: &NewPaasProject) -> Result<PaasProject, AppError> {
        Ok(self.client.post("/paas/projects", project).await?)
    }

    async fn get_projects(&self) -> Result<Vec<PaasProject>, AppError> {
        Ok(self.client.get("/paas/projects").await?)
    }

    async fn get_project(&self, id: i64) -> Result<PaasProject, AppError> {
        Ok(self.client.get(&format!("/paas/projects/{}", id)).await?)
    }

    async fn update_project(&self, id: i64, project: &UpdatePaasProject) -> Result<PaasProject, AppError> {
        Ok(self.client.put(&format!("/paas/projects/{}", id), project).await?)
    }

    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.delete(&format!("/paas/projects/{}", id)).await?)
    }

    async fn start_project(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.post_empty(&format!("/paas/projects/{}/start", id)).await?)
    }

    async fn stop_project(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.post_empty(&format!("/paas/projects/{}/stop", id)).await?)
    }
}
