//! Visitor form data and per-field errors.

use super::errors::ValidationError;
use super::phone::{PhoneNumber, DEFAULT_COUNTRY_CODE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The values entered on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorFormData {
    pub visitor_name: String,
    pub visitor_email: String,

    /// Local number, digits only
    pub phone_number: String,

    #[serde(default = "default_country_code")]
    pub country_code: String,

    pub purpose_of_visit: String,

    /// Host identifier from the directory
    pub host: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

impl Default for VisitorFormData {
    fn default() -> Self {
        Self {
            visitor_name: String::new(),
            visitor_email: String::new(),
            phone_number: String::new(),
            country_code: default_country_code(),
            purpose_of_visit: String::new(),
            host: String::new(),
        }
    }
}

impl VisitorFormData {
    /// Read the current value of a field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::VisitorName => &self.visitor_name,
            FormField::VisitorEmail => &self.visitor_email,
            FormField::PhoneNumber => &self.phone_number,
            FormField::CountryCode => &self.country_code,
            FormField::PurposeOfVisit => &self.purpose_of_visit,
            FormField::Host => &self.host,
        }
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::VisitorName => self.visitor_name = value,
            FormField::VisitorEmail => self.visitor_email = value,
            FormField::PhoneNumber => self.phone_number = value,
            FormField::CountryCode => self.country_code = value,
            FormField::PurposeOfVisit => self.purpose_of_visit = value,
            FormField::Host => self.host = value,
        }
    }

    /// Country code and local number, e.g. `+254712345678`.
    ///
    /// Formatting in a valid number is dropped. Anything else is passed
    /// through as entered.
    pub fn full_phone_number(&self) -> String {
        match PhoneNumber::new(self.phone_number.as_str()) {
            Ok(phone) => phone.with_country_code(&self.country_code),
            Err(_) => format!("{}{}", self.country_code, self.phone_number),
        }
    }

    /// Percentage (0-100) of required fields that are filled in.
    pub fn progress(&self) -> u8 {
        let filled = FormField::REQUIRED
            .iter()
            .filter(|field| !self.get(**field).trim().is_empty())
            .count();
        ((filled as f64 / FormField::REQUIRED.len() as f64) * 100.0).round() as u8
    }
}

/// A field on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    VisitorName,
    VisitorEmail,
    PhoneNumber,
    CountryCode,
    PurposeOfVisit,
    Host,
}

impl FormField {
    /// Fields that must be non-empty for the form to submit.
    pub const REQUIRED: [FormField; 5] = [
        FormField::VisitorName,
        FormField::VisitorEmail,
        FormField::PhoneNumber,
        FormField::PurposeOfVisit,
        FormField::Host,
    ];

    /// The field key as used in the form's JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::VisitorName => "visitorName",
            FormField::VisitorEmail => "visitorEmail",
            FormField::PhoneNumber => "phoneNumber",
            FormField::CountryCode => "countryCode",
            FormField::PurposeOfVisit => "purposeOfVisit",
            FormField::Host => "host",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors keyed by field. At most one error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, ValidationError>,
}

impl FormErrors {
    /// Record an error against the field it belongs to, replacing any
    /// previous error for that field.
    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field(), error);
    }

    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Human-readable message for a field, if it has an error.
    pub fn message(&self, field: FormField) -> Option<String> {
        self.errors.get(&field).map(|e| e.to_string())
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drop the error for one field. Returns whether there was one.
    pub fn clear(&mut self, field: FormField) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &ValidationError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }
}
