//! Input validation for API requests.
//!
//! Enumerated fields are enforced by serde at extraction time; the checks
//! here cover formats and numeric ranges serde cannot express.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pragmatic email shape check: local-part@domain with at least one dot
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^@\s]+@[^@\s]+\.[^@\s]+$"
    ).unwrap();
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a demo password (length only; stored as plaintext by design)
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 4 {
        return Err("Password must be at least 4 characters".to_string());
    }

    Ok(())
}

/// Validate an age in years
pub fn validate_age(age: i64) -> Result<(), String> {
    if !(1..=120).contains(&age) {
        return Err("Age must be between 1 and 120".to_string());
    }

    Ok(())
}

/// Validate a positive measurement (height, weight)
pub fn validate_positive(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be greater than 0", field_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two@@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("demo").is_ok());
        assert!(validate_password("longer password").is_ok());

        assert!(validate_password("abc").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(30).is_ok());
        assert!(validate_age(120).is_ok());

        assert!(validate_age(0).is_err());
        assert!(validate_age(121).is_err());
        assert!(validate_age(-5).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(170.0, "height_cm").is_ok());
        assert!(validate_positive(0.1, "weight_kg").is_ok());

        assert!(validate_positive(0.0, "height_cm").is_err());
        assert!(validate_positive(-62.0, "weight_kg").is_err());
        assert!(validate_positive(f64::NAN, "weight_kg").is_err());
        assert!(validate_positive(f64::INFINITY, "weight_kg").is_err());
    }
}
