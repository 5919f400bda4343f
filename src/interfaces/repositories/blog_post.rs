use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::blog_post::{BlogPost, NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::{segment, ApiBlogPostRepo},
};

#[async_trait]
pub trait BlogPostRepository: Sync + Send {
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError>;
    async fn create_blog_post(&self, post: &NewBlogPostRequest) -> Result<BlogPost, AppError>;
    async fn update_blog_post(&self, id: i64, post: &UpdateBlogPostRequest) -> Result<BlogPost, AppError>;
    async fn delete_blog_post(&self, id: i64) -> Result<(), AppError>;
}

impl ApiBlogPostRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiBlogPostRepo { client }
    }
}

#[async_trait]
impl BlogPostRepository for ApiBlogPostRepo {
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.client.get("/blogs").await?)
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError> {
        Ok(self.client.get(&format!("/blogs/{}", segment(slug))).await?)
    }

    async fn create_blog_post(&self, post: &NewBlogPostRequest) -> Result<BlogPost, AppError> {
        Ok(self.client.post("/blogs", post).await?)
    }

    async fn update_blog_post(&self, id: i64, post: &UpdateBlogPostRequest) -> Result<BlogPost, AppError> {
        Ok(self.client.put(&format!("/blogs/{}", id), post).await?)
    }

    async fn delete_blog_post(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.delete(&format!("/blogs/{}", id)).await?)
    }
}
