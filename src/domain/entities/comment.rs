use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 2, max = 80, message = "Name must be 2-80 characters"))]
    pub author_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub author_email: String,

    #[validate(length(min = 2, max = 2000, message = "Comment must be 2-2000 characters"))]
    pub content: String,
}
