//! Domain validation errors.

use super::form::FormField;
use std::fmt;

/// Minimum number of digits accepted for a local phone number.
pub const MIN_PHONE_DIGITS: usize = 9;

/// Broad category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The field is empty or whitespace-only.
    Required,

    /// The value does not have the expected shape.
    Format,

    /// The value has too few digits.
    TooShort,

    /// The value refers to a host that does not exist.
    UnknownHost,
}

/// Errors that can occur during form field and value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field was left empty.
    Required(FormField),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The phone number has fewer digits than required.
    TooShort { min_digits: usize },

    /// The selected host id is not in the directory.
    UnknownHost(String),
}

impl ValidationError {
    /// The form field this error is reported against.
    pub fn field(&self) -> FormField {
        match self {
            Self::Required(field) => *field,
            Self::InvalidEmail(_) => FormField::VisitorEmail,
            Self::InvalidPhone(_) | Self::TooShort { .. } => FormField::PhoneNumber,
            Self::UnknownHost(_) => FormField::Host,
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Required(_) => ValidationErrorKind::Required,
            Self::InvalidEmail(_) | Self::InvalidPhone(_) => ValidationErrorKind::Format,
            Self::TooShort { .. } => ValidationErrorKind::TooShort,
            Self::UnknownHost(_) => ValidationErrorKind::UnknownHost,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(FormField::VisitorName) => write!(f, "Visitor name is required"),
            Self::Required(FormField::VisitorEmail) => write!(f, "Email is required"),
            Self::Required(FormField::PhoneNumber) => write!(f, "Phone number is required"),
            Self::Required(FormField::CountryCode) => write!(f, "Country code is required"),
            Self::Required(FormField::PurposeOfVisit) => {
                write!(f, "Purpose of visit is required")
            }
            Self::Required(FormField::Host) => write!(f, "Please select a host"),
            Self::InvalidEmail(_) => write!(f, "Please enter a valid email address"),
            Self::InvalidPhone(_) => write!(f, "Please enter a valid phone number"),
            Self::TooShort { min_digits } => {
                write!(f, "Phone number must be at least {} digits", min_digits)
            }
            Self::UnknownHost(_) => write!(f, "Please select a valid host"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::Required(FormField::VisitorName).to_string(),
            "Visitor name is required"
        );
        assert_eq!(
            ValidationError::TooShort { min_digits: 9 }.to_string(),
            "Phone number must be at least 9 digits"
        );
        assert_eq!(
            ValidationError::InvalidEmail("x".to_string()).to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::InvalidPhone("0712345678".to_string()).to_string(),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_field_and_kind() {
        let err = ValidationError::InvalidEmail("nope".to_string());
        assert_eq!(err.field(), FormField::VisitorEmail);
        assert_eq!(err.kind(), ValidationErrorKind::Format);

        let err = ValidationError::UnknownHost("ghost".to_string());
        assert_eq!(err.field(), FormField::Host);
        assert_eq!(err.kind(), ValidationErrorKind::UnknownHost);
    }
}
