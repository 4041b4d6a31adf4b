//! PhoneNumber value object and phone field input handling.

use super::errors::{ValidationError, MIN_PHONE_DIGITS};

/// Dialing code preselected in a fresh form.
pub const DEFAULT_COUNTRY_CODE: &str = "+254";

/// A dialing code offered by the country selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub code: &'static str,
    pub country: &'static str,
    pub flag: &'static str,
}

/// Dialing codes offered by the country selector.
pub const COUNTRY_CODES: &[CountryCode] = &[
    CountryCode { code: "+254", country: "Kenya", flag: "🇰🇪" },
    CountryCode { code: "+256", country: "Uganda", flag: "🇺🇬" },
    CountryCode { code: "+255", country: "Tanzania", flag: "🇹🇿" },
    CountryCode { code: "+250", country: "Rwanda", flag: "🇷🇼" },
    CountryCode { code: "+257", country: "Burundi", flag: "🇧🇮" },
    CountryCode { code: "+1", country: "United States", flag: "🇺🇸" },
    CountryCode { code: "+44", country: "United Kingdom", flag: "🇬🇧" },
    CountryCode { code: "+91", country: "India", flag: "🇮🇳" },
    CountryCode { code: "+86", country: "China", flag: "🇨🇳" },
    CountryCode { code: "+49", country: "Germany", flag: "🇩🇪" },
    CountryCode { code: "+33", country: "France", flag: "🇫🇷" },
    CountryCode { code: "+81", country: "Japan", flag: "🇯🇵" },
    CountryCode { code: "+61", country: "Australia", flag: "🇦🇺" },
    CountryCode { code: "+27", country: "South Africa", flag: "🇿🇦" },
];

/// Look up a supported dialing code.
pub fn find_country_code(code: &str) -> Option<&'static CountryCode> {
    COUNTRY_CODES.iter().find(|c| c.code == code)
}

/// Strip everything but digits from raw phone input.
///
/// Returns `None` when the result would start with `0`; the local number is
/// entered without its trunk prefix since the country code is picked
/// separately.
pub fn sanitize_phone_input(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with('0') {
        return None;
    }
    Some(digits)
}

/// Apply an edit to the phone field.
///
/// A rejected edit leaves the field as it was.
///
/// ```
/// use visitor_notify::domain::apply_phone_edit;
///
/// assert_eq!(apply_phone_edit("", "0"), "");
/// assert_eq!(apply_phone_edit("71", "712-3"), "7123");
/// ```
pub fn apply_phone_edit(current: &str, raw: &str) -> String {
    match sanitize_phone_input(raw) {
        Some(digits) => digits,
        None => current.to_string(),
    }
}

/// A validated local phone number: digits only, no leading zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber from raw input.
    ///
    /// Formatting characters are stripped before checking.
    ///
    /// # Errors
    ///
    /// - `ValidationError::TooShort` if fewer than nine digits remain
    /// - `ValidationError::InvalidPhone` if the digits start with `0`
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() < MIN_PHONE_DIGITS {
            return Err(ValidationError::TooShort {
                min_digits: MIN_PHONE_DIGITS,
            });
        }

        match sanitize_phone_input(&digits) {
            Some(digits) => Ok(Self(digits)),
            None => Err(ValidationError::InvalidPhone(phone)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full international number, e.g. `+254712345678`.
    pub fn with_country_code(&self, country_code: &str) -> String {
        format!("{}{}", country_code, self.0)
    }
}
