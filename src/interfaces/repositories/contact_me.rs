use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{
        contact_me::{ContactMeForm, ContactMeMessage},
        user::MessageResponse,
    },
    errors::AppError,
    http::api_client::ApiClient,
    repositories::api_repo::ApiContactMeRepo,
};

#[async_trait]
pub trait ContactMeRepository: Send + Sync {
    async fn send_message(&self, form: &ContactMeForm) -> Result<MessageResponse, AppError>;
    async fn get_messages(&self) -> Result<Vec<ContactMeMessage>, AppError>;
    async fn mark_as_read(&self, id: i64) -> Result<ContactMeMessage, AppError>;
    async fn delete_message(&self, id: i64) -> Result<(), AppError>;
}

impl ApiContactMeRepo {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ApiContactMeRepo { client }
    }
}

#[async_trait]
impl ContactMeRepository for ApiContactMeRepo {
    async fn send_message(&self, form: &ContactMeForm) -> Result<MessageResponse, AppError> {
        Ok(self.client.post("/contact", form).await?)
    }

    async fn get_messages(&self) -> Result<Vec<ContactMeMessage>, AppError> {
        Ok(self.client.get("/contact/messages").await?)
    }

    async fn mark_as_read(&self, id: i64) -> Result<ContactMeMessage, AppError> {
        Ok(self
            .client
            .put(&format!("/contact/messages/{}/read", id), &serde_json::json!({}))
            .await?)
    }

    async fn delete_message(&self, id: i64) -> Result<(), AppError> {
        Ok(self.client.delete(&format!("/contact/messages/{}", id)).await?)
    }
}
