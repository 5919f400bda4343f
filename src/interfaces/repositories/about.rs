use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{
        about_me::Profile,
        skill::{SkillCategory, SkillsUpdate},
    },
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiAboutRepo,
};

#[async_trait]
pub trait AboutRepository: Send + Sync {
    async fn get_profile(&self) -> Result<Profile, AppError>;
    async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn get_skills(&self) -> Result<Vec<SkillCategory>, AppError>;
    async fn update_skills(&self, skills: &SkillsUpdate) -> Result<Vec<SkillCategory>, AppError>;
}

impl ApiAboutRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiAboutRepo { client }
    }
}

#[async_trait]
impl AboutRepository for ApiAboutRepo {
    async fn get_profile(&self) -> Result<Profile, AppError> {
        Ok(self.client.get("/profile").await?)
    }

    async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        Ok(self.client.put("/profile", profile).await?)
    }

    async fn get_skills(&self) -> Result<Vec<SkillCategory>, AppError> {
        Ok(self.client.get("/profile/skills").await?)
    }

    async fn update_skills(&self, skills: &SkillsUpdate) -> Result<Vec<SkillCategory>, AppError> {
        Ok(self.client.put("/profile/skills", skills).await?)
    }
}
