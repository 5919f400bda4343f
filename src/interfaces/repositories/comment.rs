use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::comment::{Comment, NewComment},
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiCommentRepo,
};

#[async_trait]
pub trait CommentRepository: Sync + Send {
    async fn get_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;
    async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment, AppError>;
    async fn get_all_comments(&self) -> Result<Vec<Comment>, AppError>;
    async fn approve_comment(&self, id: i64) -> Result<Comment, AppError>;
    async fn delete_comment(&self, id: i64) -> Result<(), AppError>;
}

impl ApiCommentRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiCommentRepo { client }
    }
}

#[async_trait]
impl CommentRepository for ApiCommentRepo {
    async fn get_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(self.client.get(&format!("/blogs/{}/comments", post_id)).await?)
    }

    async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment, AppError> {
        Ok(self.client.post(&format!("/blogs/{}/comments", post_id), comment).await?)
    }

    async fn get_all_comments(&self) -> Result<Vec<Comment>, AppError> {
        Ok(self.client.get("/comments").await?)
    }

    async fn approve_comment(&self, id: i64) -> Result<Comment, AppError> {
        Ok(self.client.put(&format!("/comments/{}/approve", id), &serde_json::json!({})).await?)
    }

    async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.delete(&format!("/comments/{}", id)).await?)
    }
}
