use serde::Serialize;

use crate::{
    errors::AppError,
    repositories::{
        blog_post::BlogPostRepository, comment::CommentRepository, contact_me::ContactMeRepository,
        project::ProjectRepository,
    },
};

/// Counters on the admin landing page. A section whose fetch failed is
/// `None` and rendered as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DashboardSummary {
    pub published_posts: Option<usize>,
    pub draft_posts: Option<usize>,
    pub projects: Option<usize>,
    pub unread_messages: Option<usize>,
    pub pending_comments: Option<usize>,
}

pub struct DashboardHandler<B, P, C, M>
where
    B: BlogPostRepository,
    P: ProjectRepository,
    C: ContactMeRepository,
    M: CommentRepository,
{
    pub blog_post_repo: B,
    pub project_repo: P,
    pub contact_repo: C,
    pub comment_repo: M,
}

impl<B, P, C, M> DashboardHandler<B, P, C, M>
where
    B: BlogPostRepository,
    P: ProjectRepository,
    C: ContactMeRepository,
    M: CommentRepository,
{
    pub fn new(blog_post_repo: B, project_repo: P, contact_repo: C, comment_repo: M) -> Self {
        DashboardHandler {
            blog_post_repo,
            project_repo,
            contact_repo,
            comment_repo,
        }
    }

    /// Fetches every section concurrently.
    pub async fn summary(&self) -> DashboardSummary {
        let (posts, projects, messages, comments) = futures::join!(
            self.blog_post_repo.get_all_blog_posts(),
            self.project_repo.get_all_projects(),
            self.contact_repo.get_messages(),
            self.comment_repo.get_all_comments(),
        );

        let posts = section("posts", posts);
        DashboardSummary {
            published_posts: posts.as_ref().map(|p| p.iter().filter(|p| p.published).count()),
            draft_posts: posts.as_ref().map(|p| p.iter().filter(|p| !p.published).count()),
            projects: section("projects", projects).map(|p| p.len()),
            unread_messages: section("messages", messages).map(|m| m.iter().filter(|m| !m.is_read).count()),
            pending_comments: section("comments", comments).map(|c| c.iter().filter(|c| !c.approved).count()),
        }
    }
}

fn section<T>(name: &'static str, result: Result<T, AppError>) -> Option<T> {
    result
        .map_err(|e| tracing::warn!(section = name, "Dashboard section unavailable: {}", e))
        .ok()
}
