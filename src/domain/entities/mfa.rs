use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::entities::blog_post::new_validation_error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfaSetup {
    pub secret: String,
    pub otpauth_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MfaCode {
    #[validate(custom(function = "validate_totp_code"))]
    pub code: String,
}

/// What the security settings page shows next to the QR code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provisioning {
    pub issuer: Option<String>,
    pub account: String,
    pub secret: String,
    pub uri: String,
}

pub fn validate_totp_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(new_validation_error("invalid_code", "Code must be 6 digits"))
    }
}

impl MfaSetup {
    /// Parses `otpauth://totp/Issuer:account?secret=...&issuer=...`.
    pub fn provisioning(&self) -> Option<Provisioning> {
        let uri = Url::parse(&self.otpauth_uri).ok()?;
        if uri.scheme() != "otpauth" || uri.host_str() != Some("totp") {
            return None;
        }

        let label = urlencoding::decode(uri.path().trim_start_matches('/')).ok()?.into_owned();
        let query_issuer = uri
            .query_pairs()
            .find(|(k, _)| k == "issuer")
            .map(|(_, v)| v.into_owned());

        let (label_issuer, account) = match label.split_once(':') {
            Some((issuer, account)) => (Some(issuer.trim().to_string()), account.trim().to_string()),
            None => (None, label.trim().to_string()),
        };
        if account.is_empty() {
            return None;
        }

        Some(Provisioning {
            issuer: query_issuer.or(label_issuer),
            account,
            secret: self.secret.clone(),
            uri: self.otpauth_uri.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provisioning_uri() {
        let setup = MfaSetup {
            secret: "JBSWY3DPEHPK3PXP".into(),
            otpauth_uri: "otpauth://totp/Portfolio:admin%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=Portfolio".into(),
        };
        let p = setup.provisioning().unwrap();
        assert_eq!(p.issuer.as_deref(), Some("Portfolio"));
        assert_eq!(p.account, "admin@example.com");
    }

    #[test]
    fn rejects_non_totp_uri() {
        let setup = MfaSetup {
            secret: "x".into(),
            otpauth_uri: "https://example.com/totp".into(),
        };
        assert!(setup.provisioning().is_none());
    }

    #[test]
    fn code_must_be_six_digits() {
        assert!(validate_totp_code("123456").is_ok());
        assert!(validate_totp_code("12345a").is_err());
        assert!(validate_totp_code("1234567").is_err());
    }
}
