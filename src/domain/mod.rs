//! Domain value objects and types.
//!
//! This module contains the registration form, type-safe wrappers for
//! email addresses and phone numbers, and the field validator. Value
//! objects validate at construction time; the validator reports every
//! problem with a form at once.

pub mod email;
pub mod errors;
pub mod form;
pub mod phone;
pub mod validator;

pub use email::EmailAddress;
pub use errors::{ValidationError, ValidationErrorKind, MIN_PHONE_DIGITS};
pub use form::{FormErrors, FormField, VisitorFormData};
pub use phone::{
    apply_phone_edit, find_country_code, sanitize_phone_input, CountryCode, PhoneNumber,
    COUNTRY_CODES, DEFAULT_COUNTRY_CODE,
};
pub use validator::validate_form;
