//! Login credentials type.

use std::fmt;

use crate::error::FieldErrors;

/// Login credentials for authenticating with the API.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use coinlens_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2!A");
/// assert_eq!(creds.email(), "alice@example.com");
/// assert!(creds.validate().is_ok());
/// ```
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check that the required fields are present before submitting.
    ///
    /// A convenience pre-check so obviously incomplete submissions never
    /// reach the network; the server remains the authority on validity.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), vec!["Email is required".to_string()]);
        }
        if self.password.is_empty() {
            errors.insert(
                "password".to_string(),
                vec!["Password is required".to_string()],
            );
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally derived to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("alice@example.com", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice@example.com"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn validate_flags_missing_fields() {
        let errors = Credentials::new("", "").validate().unwrap_err();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));

        let errors = Credentials::new("alice@example.com", "").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("password"));
    }
}
