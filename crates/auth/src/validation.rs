//! Input validation for registration fields.

use regex::Regex;

use crate::AuthError;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| AuthError::Validation("Invalid email pattern".to_string()))?;

    if !email_regex.is_match(email) {
        return Err(AuthError::Validation("Invalid email format".to_string()));
    }

    if email.len() > 255 {
        return Err(AuthError::Validation("Email too long".to_string()));
    }

    Ok(())
}

/// Validate password strength requirements
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < 8 {
        return Err(AuthError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AuthError::Validation(
            "Password must be less than 128 characters long".to_string(),
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_lowercase {
        return Err(AuthError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !has_uppercase {
        return Err(AuthError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !has_digit {
        return Err(AuthError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    Ok(())
}

/// Validate display name
pub fn validate_display_name(display_name: &str) -> Result<(), AuthError> {
    if display_name.trim().is_empty() {
        return Err(AuthError::Validation(
            "Display name cannot be empty".to_string(),
        ));
    }

    if display_name.len() > 50 {
        return Err(AuthError::Validation(
            "Display name must be less than 50 characters long".to_string(),
        ));
    }

    let disallowed_chars = ['\n', '\r', '\t', '\0'];
    if display_name.chars().any(|c| disallowed_chars.contains(&c)) {
        return Err(AuthError::Validation(
            "Display name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
