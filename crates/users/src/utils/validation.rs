//! Input validation utilities.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::UserError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static CEDULA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,}$").expect("cedula pattern"));

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if !EMAIL_RE.is_match(email) {
        return Err(UserError::ValidationFailed("Invalid email format".to_string()));
    }

    if email.len() > 255 {
        return Err(UserError::ValidationFailed("Email too long".to_string()));
    }

    Ok(())
}

/// Validate a cedula: digits only, minimum 6
pub fn validate_cedula(cedula: &str) -> Result<(), UserError> {
    if !CEDULA_RE.is_match(cedula) {
        return Err(UserError::ValidationFailed(
            "Cedula must be digits only, minimum 6".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name+tag@domain.co.uk").is_ok());

        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email("has space@example.com").is_err());
    }

    #[test]
    fn test_cedula_validation() {
        assert!(validate_cedula("123456").is_ok());
        assert!(validate_cedula("1234567890").is_ok());

        assert!(validate_cedula("12345").is_err()); // Too short
        assert!(validate_cedula("12345a").is_err()); // Non-digit
        assert!(validate_cedula("").is_err());
        assert!(validate_cedula(" 123456").is_err());
    }
}
