use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::project::{NewProjectRequest, Project, UpdateProjectRequest},
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::{segment, ApiProjectRepo},
};

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
    async fn create_project(&self, project: &NewProjectRequest) -> Result<Project, AppError>;
    async fn update_project(&self, id: i64, project: &UpdateProjectRequest) -> Result<Project, AppError>;
    async fn delete_project(&self, id: i64) -> Result<(), AppError>;
}

impl ApiProjectRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiProjectRepo { client }
    }
}

#[async_trait]
impl ProjectRepository for ApiProjectRepo {
    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.client.get("/projects").await?)
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        Ok(self.client.get(&format!("/projects/{}", segment(slug))).await?)
    }

    async fn create_project(&self, project: &NewProjectRequest) -> Result<Project, AppError> {
        Ok(self.client.post("/projects", project).await?)
    }

    async fn update_project(&self, id: i64, project: &UpdateProjectRequest) -> Result<Project, AppError> {
        Ok(self.client.put(&format!("/projects/{}", id), project).await?)
    }

    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.delete(&format!("/projects/{}", id)).await?)
    }
}
