use parking_lot::RwLock;

use crate::entities::user::User;

/// Process-wide auth state, injected wherever a view needs to know who is
/// signed in. Tests swap in their own implementation.
pub trait SessionContext: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn set_user(&self, user: Option<User>);

    fn clear(&self) {
        self.set_user(None);
    }

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|u| u.is_admin)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySession {
    user: RwLock<Option<User>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        InMemorySession {
            user: RwLock::new(Some(user)),
        }
    }
}

impl SessionContext for InMemorySession {
    fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    fn set_user(&self, user: Option<User>) {
        match &user {
            Some(u) => tracing::debug!(user_id = u.id, "Session user set"),
            None => tracing::debug!("Session cleared"),
        }
        *self.user.write() = user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            email: "admin@example.com".into(),
            username: Some("admin".into()),
            is_admin: true,
            mfa_enabled: false,
        }
    }

    #[test]
    fn tracks_and_clears_user() {
        let session = InMemorySession::new();
        assert!(!session.is_authenticated());

        session.set_user(Some(admin()));
        assert!(session.is_admin());
        assert_eq!(session.current_user().unwrap().display_name(), "admin");

        session.clear();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
    }
}
