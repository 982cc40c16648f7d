//! Credential input validation for stile.
//!
//! Validation is an explicit, composable step producing a structured list of
//! field errors. All structural violations are enumerated, not
//! short-circuited, so a caller can report every problem at once.

use serde::Serialize;
use std::fmt;

/// Minimum username length (inclusive).
pub const MIN_USERNAME_LENGTH: usize = 4;

/// Maximum username length (inclusive).
pub const MAX_USERNAME_LENGTH: usize = 15;

/// Minimum password length (inclusive).
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Maximum password length (inclusive).
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// The input field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Username,
    Password,
}

impl Field {
    /// Stable field name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable error codes for field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    /// The field is blank or missing.
    Required,
    /// The field is outside its length bounds.
    Length,
    /// The username is already taken.
    AlreadyExists,
    /// Password and confirmation differ.
    Mismatch,
    /// Credentials did not match any account. Deliberately generic.
    Invalid,
}

impl ErrorCode {
    /// Stable code string as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Length => "length",
            ErrorCode::AlreadyExists => "alreadyexists",
            ErrorCode::Mismatch => "mismatch",
            ErrorCode::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validation failure, tagged to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Which field failed.
    pub field: Field,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: Field, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// The conflict error for a duplicate username.
    pub fn username_taken() -> Self {
        Self::new(
            Field::Username,
            ErrorCode::AlreadyExists,
            "A user with that username already exists",
        )
    }

    /// The error for a password confirmation that doesn't match.
    pub fn password_mismatch() -> Self {
        Self::new(Field::Password, ErrorCode::Mismatch, "Passwords do not match")
    }

    /// The generic bad-credentials error.
    ///
    /// Used for both unknown-username and wrong-password so the two cases
    /// are indistinguishable to the caller.
    pub fn invalid_credentials() -> Self {
        Self::new(
            Field::Password,
            ErrorCode::Invalid,
            "Credentials invalid. Please try again with correct username/password combination.",
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.field, self.code, self.message)
    }
}

/// Validate a username: non-blank, 4-15 characters inclusive.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_username(username: &str) -> Option<FieldError> {
    if username.trim().is_empty() {
        return Some(FieldError::new(
            Field::Username,
            ErrorCode::Required,
            "Username is required.",
        ));
    }

    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Some(FieldError::new(
            Field::Username,
            ErrorCode::Length,
            format!(
                "Invalid username. Must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters long."
            ),
        ));
    }

    None
}

/// Validate a password: non-blank, 5-20 characters inclusive.
pub fn validate_password(password: &str) -> Option<FieldError> {
    if password.trim().is_empty() {
        return Some(FieldError::new(
            Field::Password,
            ErrorCode::Required,
            "Password is required.",
        ));
    }

    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Some(FieldError::new(
            Field::Password,
            ErrorCode::Length,
            format!(
                "Invalid password. Must be {MIN_PASSWORD_LENGTH}-{MAX_PASSWORD_LENGTH} characters long."
            ),
        ));
    }

    None
}

/// Validate a username/password pair, collecting every violation.
///
/// Used by both registration and login; the two share the same structural
/// bounds.
pub fn validate_credentials(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(validate_username(username));
    errors.extend(validate_password(password));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("john").is_none());
        assert!(validate_username("john_doe").is_none());
        assert!(validate_username("a".repeat(15).as_str()).is_none());
    }

    #[test]
    fn test_validate_username_boundaries() {
        // 3 rejected, 4 accepted; 15 accepted, 16 rejected
        assert_eq!(
            validate_username("abc").unwrap().code,
            ErrorCode::Length
        );
        assert!(validate_username("abcd").is_none());
        assert!(validate_username("a".repeat(15).as_str()).is_none());
        assert_eq!(
            validate_username("a".repeat(16).as_str()).unwrap().code,
            ErrorCode::Length
        );
    }

    #[test]
    fn test_validate_username_blank() {
        let err = validate_username("").unwrap();
        assert_eq!(err.field, Field::Username);
        assert_eq!(err.code, ErrorCode::Required);

        // Whitespace-only counts as blank, not as a length violation
        let err = validate_username("      ").unwrap();
        assert_eq!(err.code, ErrorCode::Required);
    }

    #[test]
    fn test_validate_username_chars_not_bytes() {
        // 4 multi-byte characters pass the lower bound
        assert!(validate_username("ユーザー").is_none());
    }

    #[test]
    fn test_validate_password_boundaries() {
        assert_eq!(
            validate_password("abcd").unwrap().code,
            ErrorCode::Length
        );
        assert!(validate_password("abcde").is_none());
        assert!(validate_password("a".repeat(20).as_str()).is_none());
        assert_eq!(
            validate_password("a".repeat(21).as_str()).unwrap().code,
            ErrorCode::Length
        );
    }

    #[test]
    fn test_validate_password_blank() {
        let err = validate_password("").unwrap();
        assert_eq!(err.field, Field::Password);
        assert_eq!(err.code, ErrorCode::Required);
    }

    #[test]
    fn test_validate_credentials_collects_all() {
        let errors = validate_credentials("ab", "x");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, Field::Username);
        assert_eq!(errors[1].field, Field::Password);
    }

    #[test]
    fn test_validate_credentials_valid() {
        assert!(validate_credentials("alice1", "secret12").is_empty());
    }

    #[test]
    fn test_canned_errors() {
        let taken = FieldError::username_taken();
        assert_eq!(taken.field, Field::Username);
        assert_eq!(taken.code, ErrorCode::AlreadyExists);

        let mismatch = FieldError::password_mismatch();
        assert_eq!(mismatch.field, Field::Password);
        assert_eq!(mismatch.code, ErrorCode::Mismatch);

        let invalid = FieldError::invalid_credentials();
        assert_eq!(invalid.code, ErrorCode::Invalid);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Field::Username.as_str(), "username");
        assert_eq!(ErrorCode::AlreadyExists.as_str(), "alreadyexists");
        assert_eq!(ErrorCode::Mismatch.as_str(), "mismatch");
    }

    #[test]
    fn test_field_error_serialization() {
        let err = FieldError::username_taken();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "username");
        assert_eq!(json["code"], "alreadyexists");
        assert_eq!(json["message"], "A user with that username already exists");
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new(Field::Username, ErrorCode::Required, "Username is required.");
        assert_eq!(err.to_string(), "username.required: Username is required.");
    }
}
