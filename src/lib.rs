use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod api_errors;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;

pub use domain::{entities, password, session, skill_wheel, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{http, utils};

use api_errors::ApiError;
use http::api_client::ApiClient;
use repositories::api_repo::{
    ApiAboutRepo, ApiBlogPostRepo, ApiCommentRepo, ApiContactMeRepo, ApiPaasRepo, ApiProjectRepo,
    ApiSecurityRepo, ApiSystemRepo, ApiTtsRepo, ApiUserRepo,
};
use session::{InMemorySession, SessionContext};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    about::AboutHandler, auth::AuthHandler, blog::BlogPostHandler, comment::CommentHandler,
    contact::ContactHandler, dashboard::DashboardHandler, paas::PaasHandler, project::ProjectHandler,
    security::SecurityHandler, system::SystemHandler, tts::TtsHandler,
};

pub type AppAuthHandler = AuthHandler<ApiUserRepo>;
pub type AppDashboardHandler = DashboardHandler<ApiBlogPostRepo, ApiProjectRepo, ApiContactMeRepo, ApiCommentRepo>;

pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<dyn SessionContext>,
    pub api_client: Arc<ApiClient>,
    /// Plain client for the `/api` pass-through: no cookie jar, no redirects.
    pub proxy_client: reqwest::Client,
    pub auth_handler: AppAuthHandler,
    pub security_handler: SecurityHandler<ApiSecurityRepo>,
    pub about_handler: AboutHandler<ApiAboutRepo>,
    pub blog_handler: BlogPostHandler<ApiBlogPostRepo>,
    pub project_handler: ProjectHandler<ApiProjectRepo>,
    pub comment_handler: CommentHandler<ApiCommentRepo>,
    pub contact_handler: ContactHandler<ApiContactMeRepo>,
    pub system_handler: SystemHandler<ApiSystemRepo>,
    pub paas_handler: PaasHandler<ApiPaasRepo>,
    pub tts_handler: TtsHandler<ApiTtsRepo>,
    pub dashboard_handler: AppDashboardHandler,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_session(config, Arc::new(InMemorySession::new()))
    }

    pub fn with_session(config: &AppConfig, session: Arc<dyn SessionContext>) -> Result<Self, ApiError> {
        let api_client = Arc::new(ApiClient::new(config, session.clone())?);
        let proxy_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let repos = SharedRepositories::new(api_client.clone());

        Ok(AppState {
            config: config.clone(),
            auth_handler: AuthHandler::new(repos.user_repo, session.clone()),
            security_handler: SecurityHandler::new(repos.security_repo, session.clone()),
            about_handler: AboutHandler::new(repos.about_repo),
            blog_handler: BlogPostHandler::new(repos.blog_post_repo.clone()),
            project_handler: ProjectHandler::new(repos.project_repo.clone()),
            comment_handler: CommentHandler::new(repos.comment_repo.clone()),
            contact_handler: ContactHandler::new(repos.contact_repo.clone()),
            system_handler: SystemHandler::new(repos.system_repo, config.upload_max_bytes),
            paas_handler: PaasHandler::new(repos.paas_repo, config),
            tts_handler: TtsHandler::new(repos.tts_repo, config),
            dashboard_handler: DashboardHandler::new(
                repos.blog_post_repo,
                repos.project_repo,
                repos.contact_repo,
                repos.comment_repo,
            ),
            session,
            api_client,
            proxy_client,
        })
    }
}
