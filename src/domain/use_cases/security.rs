use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        mfa::{MfaCode, Provisioning},
        user::MessageResponse,
    },
    errors::AppError,
    repositories::security::SecurityRepository,
    session::SessionContext,
};

/// Security settings page: MFA enrolment and removal.
pub struct SecurityHandler<R>
where
    R: SecurityRepository,
{
    pub security_repo: R,
    session: Arc<dyn SessionContext>,
}

impl<R> SecurityHandler<R>
where
    R: SecurityRepository,
{
    pub fn new(security_repo: R, session: Arc<dyn SessionContext>) -> Self {
        SecurityHandler { security_repo, session }
    }

    /// Starts enrolment. Fails if the backend hands back a URI that can't
    /// be turned into a QR code.
    pub async fn begin_mfa_setup(&self) -> Result<Provisioning, AppError> {
        let setup = self.security_repo.setup_mfa().await?;
        setup
            .provisioning()
            .ok_or_else(|| AppError::InternalError("Backend returned an invalid otpauth URI".to_string()))
    }

    pub async fn enable_mfa(&self, code: MfaCode) -> Result<MessageResponse, AppError> {
        code.validate()?;
        let response = self.security_repo.enable_mfa(&code).await?;
        self.set_mfa_flag(true);
        Ok(response)
    }

    pub async fn disable_mfa(&self, code: MfaCode) -> Result<MessageResponse, AppError> {
        code.validate()?;
        let response = self.security_repo.disable_mfa(&code).await?;
        self.set_mfa_flag(false);
        Ok(response)
    }

    fn set_mfa_flag(&self, enabled: bool) {
        if let Some(mut user) = self.session.current_user() {
            user.mfa_enabled = enabled;
            self.session.set_user(Some(user));
        }
    }
}
