use validator::Validate;

use crate::{
    entities::{
        contact_me::{ContactInbox, ContactMeForm, ContactMeMessage},
        user::MessageResponse,
    },
    errors::AppError,
    repositories::contact_me::ContactMeRepository,
};

pub struct ContactHandler<R>
where
    R: ContactMeRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactMeRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    pub async fn send_message(&self, form: ContactMeForm) -> Result<MessageResponse, AppError> {
        form.validate()?;

        let form = ContactMeForm {
            subject: form.subject.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            ..form
        };
        self.contact_repo.send_message(&form).await
    }

    pub async fn get_inbox(&self) -> Result<ContactInbox, AppError> {
        let messages = self.contact_repo.get_messages().await?;
        Ok(ContactInbox::from(messages))
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<ContactMeMessage, AppError> {
        self.contact_repo.mark_as_read(id).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), AppError> {
        self.contact_repo.delete_message(id).await
    }
}
