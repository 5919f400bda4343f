use validator::Validate;

use crate::{
    entities::comment::{Comment, NewComment},
    errors::AppError,
    repositories::comment::CommentRepository,
};

pub struct CommentHandler<R>
where
    R: CommentRepository,
{
    pub comment_repo: R,
}

impl<R> CommentHandler<R>
where
    R: CommentRepository,
{
    pub fn new(comment_repo: R) -> Self {
        CommentHandler { comment_repo }
    }

    /// Approved comments under a post, oldest first.
    pub async fn get_post_comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let mut comments: Vec<Comment> = self
            .comment_repo
            .get_comments_for_post(post_id)
            .await?
            .into_iter()
            .filter(|c| c.approved)
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    pub async fn add_comment(&self, post_id: i64, comment: NewComment) -> Result<Comment, AppError> {
        comment.validate()?;
        self.comment_repo.create_comment(post_id, &comment).await
    }

    /// Moderation queue, unapproved first and newest first within each group.
    pub async fn get_moderation_queue(&self) -> Result<Vec<Comment>, AppError> {
        let mut comments = self.comment_repo.get_all_comments().await?;
        comments.sort_by(|a, b| a.approved.cmp(&b.approved).then(b.created_at.cmp(&a.created_at)));
        Ok(comments)
    }

    pub async fn pending_count(&self) -> Result<usize, AppError> {
        let comments = self.comment_repo.get_all_comments().await?;
        Ok(comments.iter().filter(|c| !c.approved).count())
    }

    pub async fn approve_comment(&self, id: i64) -> Result<Comment, AppError> {
        self.comment_repo.approve_comment(id).await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        self.comment_repo.delete_comment(id).await
    }
}
