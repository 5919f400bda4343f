use serde::{Serialize, Deserialize};

use crate::entities::user::User;

/// Body returned by login and refresh. Tokens travel as cookies; the body
/// only reports who is signed in and whether a second factor is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub mfa_required: bool,
}

/// Outcome of a login attempt as the login view sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    SignedIn(User),
    MfaRequired,
}
