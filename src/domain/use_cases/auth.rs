use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        token::LoginOutcome,
        user::{LoginUser, MessageResponse, NewUser, User},
    },
    errors::AppError,
    password::check_password,
    repositories::user::UserRepository,
    session::SessionContext,
};

pub struct AuthHandler<R>
where
    R: UserRepository,
{
    pub user_repo: R,
    session: Arc<dyn SessionContext>,
}

impl<R> AuthHandler<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R, session: Arc<dyn SessionContext>) -> Self {
        AuthHandler { user_repo, session }
    }

    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }

    /// Signs in and records the user in the session. When the account has
    /// MFA enabled and no code was sent, the session stays anonymous.
    pub async fn login(&self, credentials: LoginUser) -> Result<LoginOutcome, AppError> {
        credentials.validate()?;

        let response = self.user_repo.login(&credentials).await?;
        if response.mfa_required {
            tracing::info!(email = %credentials.email, "Login needs a second factor");
            return Ok(LoginOutcome::MfaRequired);
        }

        let user = match response.user {
            Some(user) => user,
            None => self.user_repo.me().await?,
        };
        tracing::info!(user_id = user.id, "Signed in");
        self.session.set_user(Some(user.clone()));

        Ok(LoginOutcome::SignedIn(user))
    }

    pub async fn register(&self, new_user: NewUser) -> Result<MessageResponse, AppError> {
        new_user.validate()?;

        let mut inputs = vec![new_user.email.as_str()];
        if let Some(username) = new_user.username.as_deref() {
            inputs.push(username);
        }
        check_password(&new_user.password, &inputs)?;

        self.user_repo.register(&new_user).await
    }

    /// Always ends the local session; a backend failure is only logged.
    pub async fn logout(&self) -> Result<(), AppError> {
        if let Err(e) = self.user_repo.logout().await {
            tracing::warn!("Backend logout failed: {}", e);
        }
        self.session.clear();
        Ok(())
    }

    /// Re-reads the signed-in user, e.g. on first page load. An expired
    /// session resolves to `None` rather than an error.
    pub async fn restore_session(&self) -> Result<Option<User>, AppError> {
        match self.user_repo.me().await {
            Ok(user) => {
                self.session.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(AppError::UnauthorizedAccess) => {
                self.session.clear();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Admin pages call this before rendering anything.
    pub fn require_admin(&self) -> Result<User, AppError> {
        match self.session.current_user() {
            Some(user) if user.is_admin => Ok(user),
            Some(_) => Err(AppError::ForbiddenAccess),
            None => Err(AppError::UnauthorizedAccess),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    use crate::{entities::token::AuthResponse, session::InMemorySession};

    mock! {
        pub UserRepo {}

        #[async_trait]
        impl UserRepository for UserRepo {
            async fn login(&self, credentials: &LoginUser) -> Result<AuthResponse, AppError>;
            async fn register(&self, new_user: &NewUser) -> Result<MessageResponse, AppError>;
            async fn logout(&self) -> Result<(), AppError>;
            async fn me(&self) -> Result<User, AppError>;
        }
    }

    fn user(is_admin: bool) -> User {
        User {
            id: 7,
            email: "owner@example.com".into(),
            username: Some("owner".into()),
            is_admin,
            mfa_enabled: false,
        }
    }

    fn credentials() -> LoginUser {
        LoginUser {
            email: "owner@example.com".into(),
            password: "whatever".into(),
            mfa_code: None,
        }
    }

    #[tokio::test]
    async fn login_sets_session_user() {
        let mut repo = MockUserRepo::new();
        repo.expect_login().returning(|_| {
            Ok(AuthResponse {
                message: "ok".into(),
                user: Some(user(true)),
                mfa_required: false,
            })
        });
        repo.expect_me().never();

        let session = Arc::new(InMemorySession::new());
        let handler = AuthHandler::new(repo, session.clone());

        let outcome = handler.login(credentials()).await.unwrap();

        assert_eq!(outcome, LoginOutcome::SignedIn(user(true)));
        assert!(session.is_admin());
        assert!(handler.require_admin().is_ok());
    }

    #[tokio::test]
    async fn login_falls_back_to_me_when_body_has_no_user() {
        let mut repo = MockUserRepo::new();
        repo.expect_login().returning(|_| Ok(AuthResponse::default()));
        repo.expect_me().times(1).returning(|| Ok(user(false)));

        let session = Arc::new(InMemorySession::new());
        let handler = AuthHandler::new(repo, session.clone());

        handler.login(credentials()).await.unwrap();
        assert_eq!(session.current_user().unwrap().id, 7);
        assert!(matches!(handler.require_admin(), Err(AppError::ForbiddenAccess)));
    }

    #[tokio::test]
    async fn mfa_challenge_leaves_session_anonymous() {
        let mut repo = MockUserRepo::new();
        repo.expect_login().returning(|_| {
            Ok(AuthResponse {
                mfa_required: true,
                ..Default::default()
            })
        });

        let session = Arc::new(InMemorySession::new());
        let handler = AuthHandler::new(repo, session.clone());

        assert_eq!(handler.login(credentials()).await.unwrap(), LoginOutcome::MfaRequired);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn invalid_login_form_never_reaches_backend() {
        let mut repo = MockUserRepo::new();
        repo.expect_login().never();

        let handler = AuthHandler::new(repo, Arc::new(InMemorySession::new()));
        let result = handler
            .login(LoginUser {
                email: "not-an-email".into(),
                password: String::new(),
                mfa_code: None,
            })
            .await;

        match result {
            Err(AppError::ValidationError(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_rejects_weak_password_before_sending() {
        let mut repo = MockUserRepo::new();
        repo.expect_register().never();

        let handler = AuthHandler::new(repo, Arc::new(InMemorySession::new()));
        let result = handler
            .register(NewUser {
                email: "new@example.com".into(),
                username: None,
                password: "password".into(),
                password_confirm: "password".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn logout_clears_session_even_if_backend_fails() {
        let mut repo = MockUserRepo::new();
        repo.expect_logout().returning(|| Err(AppError::Unavailable("down".into())));

        let session = Arc::new(InMemorySession::with_user(user(true)));
        let handler = AuthHandler::new(repo, session.clone());

        handler.logout().await.unwrap();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn expired_session_restores_as_anonymous() {
        let mut repo = MockUserRepo::new();
        repo.expect_me().returning(|| Err(AppError::UnauthorizedAccess));

        let session = Arc::new(InMemorySession::with_user(user(false)));
        let handler = AuthHandler::new(repo, session.clone());

        assert_eq!(handler.restore_session().await.unwrap(), None);
        assert!(!session.is_authenticated());
        assert!(matches!(handler.require_admin(), Err(AppError::UnauthorizedAccess)));
    }
}
