use validator::Validate;

use crate::{
    entities::project::{NewProjectRequest, Project, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Newest year first, featured before the rest within a year.
    pub async fn get_projects(&self, category: Option<&str>) -> Result<Vec<Project>, AppError> {
        let mut projects: Vec<Project> = self
            .project_repo
            .get_all_projects()
            .await?
            .into_iter()
            .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
            .collect();

        projects.sort_by(|a, b| b.year.cmp(&a.year).then(b.featured.cmp(&a.featured)));
        Ok(projects)
    }

    pub async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = self.get_projects(None).await?;
        Ok(projects.into_iter().filter(|p| p.featured).collect())
    }

    /// Distinct categories in first-seen order, for the filter bar.
    pub async fn get_categories(&self) -> Result<Vec<String>, AppError> {
        let mut categories: Vec<String> = Vec::new();
        for project in self.project_repo.get_all_projects().await? {
            if !categories.iter().any(|c| c.eq_ignore_ascii_case(&project.category)) {
                categories.push(project.category);
            }
        }
        Ok(categories)
    }

    pub async fn get_project(&self, slug: &str) -> Result<Project, AppError> {
        self.project_repo.get_project_by_slug(slug).await
    }

    pub async fn create_project(&self, project: NewProjectRequest) -> Result<Project, AppError> {
        project.validate()?;
        let project = project.with_generated_slug();

        let created = self.project_repo.create_project(&project).await?;
        tracing::info!(id = created.id, slug = %created.slug, "Project created");
        Ok(created)
    }

    pub async fn update_project(&self, id: i64, project: &UpdateProjectRequest) -> Result<Project, AppError> {
        project.validate()?;
        self.project_repo.update_project(id, project).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.project_repo.delete_project(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub ProjectRepo {}

        #[async_trait]
        impl ProjectRepository for ProjectRepo {
            async fn get_all_projects(&self) -> Result<Vec<Project>, AppError>;
            async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
            async fn create_project(&self, project: &NewProjectRequest) -> Result<Project, AppError>;
            async fn update_project(&self, id: i64, project: &UpdateProjectRequest) -> Result<Project, AppError>;
            async fn delete_project(&self, id: i64) -> Result<(), AppError>;
        }
    }

    fn project(id: i64, category: &str, year: i32, featured: bool) -> Project {
        Project {
            id,
            slug: format!("project-{}", id),
            title: format!("Project {}", id),
            description: "Something useful".into(),
            long_description: String::new(),
            thumbnail: None,
            image: Some("https://cdn.example.com/p.png".into()),
            technologies: vec!["Rust".into()],
            github_url: None,
            live_url: None,
            featured,
            category: category.into(),
            year,
        }
    }

    fn catalogue() -> Vec<Project> {
        vec![
            project(1, "Web", 2022, false),
            project(2, "CLI", 2024, false),
            project(3, "web", 2024, true),
        ]
    }

    #[tokio::test]
    async fn lists_newest_and_featured_first() {
        let mut repo = MockProjectRepo::new();
        repo.expect_get_all_projects().returning(|| Ok(catalogue()));

        let handler = ProjectHandler::new(repo);
        let ids: Vec<i64> = handler.get_projects(None).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let web: Vec<i64> = handler.get_projects(Some("WEB")).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(web, vec![3, 1]);
    }

    #[tokio::test]
    async fn categories_are_distinct_in_first_seen_order() {
        let mut repo = MockProjectRepo::new();
        repo.expect_get_all_projects().returning(|| Ok(catalogue()));

        let handler = ProjectHandler::new(repo);
        assert_eq!(handler.get_categories().await.unwrap(), vec!["Web", "CLI"]);
        assert_eq!(handler.get_featured_projects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_fills_slug_and_rejects_bad_links() {
        let mut repo = MockProjectRepo::new();
        repo.expect_create_project()
            .withf(|p| p.slug.as_deref() == Some("portfolio-engine"))
            .times(1)
            .returning(|_| Ok(project(5, "Web", 2024, false)));

        let handler = ProjectHandler::new(repo);
        let request = NewProjectRequest {
            title: "Portfolio Engine".into(),
            slug: None,
            description: "A portfolio engine".into(),
            long_description: String::new(),
            thumbnail: None,
            image: None,
            technologies: vec!["Rust".into()],
            github_url: Some("https://github.com/me/engine".into()),
            live_url: None,
            featured: false,
            category: "Web".into(),
            year: 2024,
        };
        assert_eq!(handler.create_project(request.clone()).await.unwrap().id, 5);

        let bad = NewProjectRequest {
            github_url: Some("ftp://example.com/repo".into()),
            ..request
        };
        assert!(matches!(handler.create_project(bad).await, Err(AppError::ValidationError(_))));
    }
}
