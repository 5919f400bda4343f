use std::sync::Arc;

use crate::{
    http::api_client::ApiClient,
    repositories::api_repo::{
        ApiAboutRepo, ApiBlogPostRepo, ApiCommentRepo, ApiContactMeRepo, ApiPaasRepo, ApiProjectRepo,
        ApiSecurityRepo, ApiSystemRepo, ApiTtsRepo, ApiUserRepo,
    },
};

/// Every repository, all talking through the same session-aware client so
/// they share one cookie jar and one refresh.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: ApiUserRepo,
    pub security_repo: ApiSecurityRepo,
    pub about_repo: ApiAboutRepo,
    pub blog_post_repo: ApiBlogPostRepo,
    pub project_repo: ApiProjectRepo,
    pub comment_repo: ApiCommentRepo,
    pub contact_repo: ApiContactMeRepo,
    pub system_repo: ApiSystemRepo,
    pub paas_repo: ApiPaasRepo,
    pub tts_repo: ApiTtsRepo,
}

impl SharedRepositories {
    pub fn new(client: Arc<ApiClient>) -> Self {
        SharedRepositories {
            user_repo: ApiUserRepo::new(client.clone()),
            security_repo: ApiSecurityRepo::new(client.clone()),
            about_repo: ApiAboutRepo::new(client.clone()),
            blog_post_repo: ApiBlogPostRepo::new(client.clone()),
            project_repo: ApiProjectRepo::new(client.clone()),
            comment_repo: ApiCommentRepo::new(client.clone()),
            contact_repo: ApiContactMeRepo::new(client.clone()),
            system_repo: ApiSystemRepo::new(client.clone()),
            paas_repo: ApiPaasRepo::new(client.clone()),
            tts_repo: ApiTtsRepo::new(client),
        }
    }
}
