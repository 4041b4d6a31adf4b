//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` shape. Deliberately loose, not RFC 5322.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.\S+$").expect("email pattern is a valid regex"));

/// A type-safe wrapper for email addresses.
///
/// This ensures that email addresses are validated at construction time.
///
/// # Example
///
/// ```
/// use visitor_notify::domain::EmailAddress;
///
/// let email = EmailAddress::new("john@example.com").unwrap();
/// assert_eq!(email.as_str(), "john@example.com");
/// assert!(EmailAddress::new("john@example").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - One or more characters that are neither whitespace nor '@'
    /// - A single '@'
    /// - One or more characters that are neither whitespace nor '@', then '.'
    /// - One or more non-whitespace characters
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    /// Check an address against the accepted shape without constructing it.
    pub fn is_valid(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
