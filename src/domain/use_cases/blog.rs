use validator::Validate;

use crate::{
    entities::blog_post::{BlogPost, BlogPostCard, BlogPostDetail, NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
};

pub struct BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub blog_post_repo: R,
}

impl<R> BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub fn new(blog_post_repo: R) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    /// Published posts only, newest first.
    pub async fn get_published_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let mut posts: Vec<BlogPost> = self
            .blog_post_repo
            .get_all_blog_posts()
            .await?
            .into_iter()
            .filter(|p| p.published)
            .collect();

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    /// Cards for the blog index, optionally narrowed to one tag.
    pub async fn get_post_cards(&self, tag: Option<&str>) -> Result<Vec<BlogPostCard>, AppError> {
        let posts = self.get_published_posts().await?;
        Ok(posts
            .iter()
            .filter(|p| tag.is_none_or(|t| p.has_tag(t)))
            .map(BlogPost::to_card)
            .collect())
    }

    pub async fn get_featured_posts(&self, limit: usize) -> Result<Vec<BlogPostCard>, AppError> {
        let posts = self.get_published_posts().await?;
        Ok(posts
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .map(BlogPost::to_card)
            .collect())
    }

    /// Every tag in use on published posts, sorted and de-duplicated.
    pub async fn get_tags(&self) -> Result<Vec<String>, AppError> {
        let mut tags: Vec<String> = self
            .get_published_posts()
            .await?
            .into_iter()
            .flat_map(|p| p.tags)
            .collect();
        tags.sort_by_key(|t| t.to_lowercase());
        tags.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        Ok(tags)
    }

    /// Public post page. Drafts are reported as not found.
    pub async fn get_post_detail(&self, slug: &str) -> Result<BlogPostDetail, AppError> {
        let post = self.blog_post_repo.get_blog_post_by_slug(slug).await?;
        if !post.published {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        }
        Ok(post.to_detail())
    }

    /// Admin list, drafts included.
    pub async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.get_all_blog_posts().await
    }

    pub async fn create_blog_post(&self, post: NewBlogPostRequest) -> Result<BlogPost, AppError> {
        let post = post.prepare()?;
        let created = self.blog_post_repo.create_blog_post(&post).await?;
        tracing::info!(id = created.id, slug = %created.slug, "Blog post created");
        Ok(created)
    }

    pub async fn update_blog_post(&self, id: i64, post: &UpdateBlogPostRequest) -> Result<BlogPost, AppError> {
        post.validate()?;
        self.blog_post_repo.update_blog_post(id, post).await
    }

    pub async fn delete_blog_post(&self, id: i64) -> Result<(), AppError> {
        self.blog_post_repo
            .delete_blog_post(id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Blog post not found".to_string()),
                _ => e,
            })
    }
}
