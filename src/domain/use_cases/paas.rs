use std::sync::Arc;

use tokio::{sync::watch, time::Duration};
use validator::Validate;

use crate::{
    background_task::PollTask,
    entities::paas_project::{NewPaasProject, PaasProject, UpdatePaasProject},
    errors::AppError,
    repositories::paas::PaasRepository,
    settings::AppConfig,
};

/// A running poller plus the latest value it fetched.
///
/// The value starts as `None` and is replaced by every successful fetch.
/// Dropping the watch stops polling.
pub struct DeploymentWatch<T> {
    task: PollTask,
    latest: watch::Receiver<Option<T>>,
}

impl<T: Clone> DeploymentWatch<T> {
    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    /// A receiver for views that want to await updates themselves.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.latest.clone()
    }

    /// Waits for the next successful fetch. `None` once polling stopped.
    pub async fn changed(&mut self) -> Option<T> {
        self.latest.changed().await.ok()?;
        self.latest.borrow_and_update().clone()
    }

    pub async fn stop(self) {
        self.task.shutdown().await;
    }
}

pub struct PaasHandler<R>
where
    R: PaasRepository + 'static,
{
    pub paas_repo: Arc<R>,
    detail_period: Duration,
    list_period: Duration,
}

impl<R> PaasHandler<R>
where
    R: PaasRepository + 'static,
{
    pub fn new(paas_repo: R, config: &AppConfig) -> Self {
        Self::with_intervals(
            paas_repo,
            config.deployment_poll_interval(),
            config.deployment_list_poll_interval(),
        )
    }

    pub fn with_intervals(paas_repo: R, detail_period: Duration, list_period: Duration) -> Self {
        PaasHandler {
            paas_repo: Arc::new(paas_repo),
            detail_period,
            list_period,
        }
    }

    pub async fn create_project(&self, project: NewPaasProject) -> Result<PaasProject, AppError> {
        project.validate()?;
        let project = project.with_default_name();

        let created = self.paas_repo.create_project(&project).await?;
        tracing::info!(id = created.id, repo = %created.repo_url, "Deployment requested");
        Ok(created)
    }

    /// Newest first.
    pub async fn list_projects(&self) -> Result<Vec<PaasProject>, AppError> {
        let mut projects = self.paas_repo.get_projects().await?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    pub async fn get_project(&self, id: i64) -> Result<PaasProject, AppError> {
        self.paas_repo.get_project(id).await
    }

    pub async fn update_project(&self, id: i64, update: &UpdatePaasProject) -> Result<PaasProject, AppError> {
        update.validate()?;
        self.paas_repo.update_project(id, update).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.paas_repo.delete_project(id).await?;
        tracing::info!(id, "Deployment deleted");
        Ok(())
    }

    pub async fn start_project(&self, id: i64) -> Result<(), AppError> {
        self.paas_repo.start_project(id).await?;
        tracing::info!(id, "Deployment start requested");
        Ok(())
    }

    pub async fn stop_project(&self, id: i64) -> Result<(), AppError> {
        self.paas_repo.stop_project(id).await?;
        tracing::info!(id, "Deployment stop requested");
        Ok(())
    }

    /// Re-fetches one project on the detail interval until the watch is
    /// dropped. Polls regardless of status; failed fetches keep the
    /// previous value.
    pub fn watch_project(&self, id: i64) -> DeploymentWatch<PaasProject> {
        let (tx, latest) = watch::channel(None);
        let tx = Arc::new(tx);
        let repo = self.paas_repo.clone();

        let task = PollTask::spawn("paas-project", self.detail_period, move || {
            let repo = repo.clone();
            let tx = tx.clone();
            async move {
                match repo.get_project(id).await {
                    Ok(project) => {
                        tracing::debug!(id, status = %project.status, "Deployment polled");
                        tx.send_replace(Some(project));
                    }
                    Err(e) => tracing::warn!(id, "Deployment poll failed: {}", e),
                }
            }
        });

        DeploymentWatch { task, latest }
    }

    /// Same as [`PaasHandler::watch_project`] for the whole list.
    pub fn watch_projects(&self) -> DeploymentWatch<Vec<PaasProject>> {
        let (tx, latest) = watch::channel(None);
        let tx = Arc::new(tx);
        let repo = self.paas_repo.clone();

        let task = PollTask::spawn("paas-projects", self.list_period, move || {
            let repo = repo.clone();
            let tx = tx.clone();
            async move {
                match repo.get_projects().await {
                    Ok(mut projects) => {
                        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                        tx.send_replace(Some(projects));
                    }
                    Err(e) => tracing::warn!("Deployment list poll failed: {}", e),
                }
            }
        });

        DeploymentWatch { task, latest }
    }
}
