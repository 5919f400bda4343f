use validator::Validate;

use crate::{
    entities::{
        about_me::Profile,
        skill::{SkillCategory, SkillsUpdate},
    },
    errors::AppError,
    repositories::about::AboutRepository,
    skill_wheel::{SkillWheel, WheelGeometry},
};

pub struct AboutHandler<R>
where
    R: AboutRepository,
{
    pub about_repo: R,
    geometry: WheelGeometry,
}

impl<R> AboutHandler<R>
where
    R: AboutRepository,
{
    pub fn new(about_repo: R) -> Self {
        AboutHandler {
            about_repo,
            geometry: WheelGeometry::default(),
        }
    }

    pub fn with_geometry(about_repo: R, geometry: WheelGeometry) -> Self {
        AboutHandler { about_repo, geometry }
    }

    pub async fn get_profile(&self) -> Result<Profile, AppError> {
        self.about_repo.get_profile().await
    }

    pub async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        profile.validate()?;
        self.about_repo.update_profile(profile).await
    }

    pub async fn get_skills(&self) -> Result<Vec<SkillCategory>, AppError> {
        self.about_repo.get_skills().await
    }

    /// Fetches the skill categories and lays them out as a wheel.
    pub async fn get_skill_wheel(&self) -> Result<SkillWheel, AppError> {
        let categories = self.about_repo.get_skills().await?;
        Ok(SkillWheel::layout(&categories, self.geometry))
    }

    /// Validates every category and skill, then replaces the whole set.
    pub async fn update_skills(&self, categories: Vec<SkillCategory>) -> Result<Vec<SkillCategory>, AppError> {
        let update = SkillsUpdate { categories };
        update.validate()?;

        let saved = self.about_repo.update_skills(&update).await?;
        tracing::info!(categories = saved.len(), "Skills updated");
        Ok(saved)
    }
}
