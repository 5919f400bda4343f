use validator::ValidationError;
use zxcvbn::zxcvbn;

use crate::errors::PasswordError;

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: u8 = 3;
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>/?~";

/// Checks a registration password before it is sent anywhere.
pub fn check_password(password: &str, user_inputs: &[&str]) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PasswordError::TooShort(MIN_LENGTH));
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| SYMBOLS.contains(c));

    if !(has_upper && has_lower && has_digit && has_symbol) {
        return Err(PasswordError::InsufficientComplexity);
    }

    let estimate = zxcvbn(password, user_inputs);
    if (estimate.score() as u8) < MIN_STRENGTH_SCORE {
        let feedback = estimate.feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Add another word or two".to_string());
        return Err(PasswordError::WeakWithFeedback(feedback));
    }

    Ok(())
}

/// `validator` adapter for the register form.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    check_password(password, &[]).map_err(|e| {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(e.to_string().into());
        error
    })
}
