use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactMeForm {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 100))]
    pub subject: Option<String>,

    #[validate(length(min = 5, max = 1000))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMeMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Inbox view for the admin messages page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInbox {
    pub messages: Vec<ContactMeMessage>,
    pub total: usize,
    pub unread: usize,
}

impl From<Vec<ContactMeMessage>> for ContactInbox {
    fn from(mut messages: Vec<ContactMeMessage>) -> Self {
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let unread = messages.iter().filter(|m| !m.is_read).count();
        ContactInbox {
            total: messages.len(),
            unread,
            messages,
        }
    }
}
