//! Form field validation.
//!
//! Every rule runs on each pass so all problems surface at once.

use super::email::EmailAddress;
use super::errors::ValidationError;
use super::form::{FormErrors, FormField, VisitorFormData};
use super::phone::PhoneNumber;

/// Validate the whole form.
///
/// Returns whether the form is valid together with the errors found. The
/// errors are rebuilt from scratch on every call.
pub fn validate_form(form: &VisitorFormData) -> (bool, FormErrors) {
    let mut errors = FormErrors::default();

    if form.visitor_name.trim().is_empty() {
        errors.insert(ValidationError::Required(FormField::VisitorName));
    }

    if form.visitor_email.trim().is_empty() {
        errors.insert(ValidationError::Required(FormField::VisitorEmail));
    } else if let Err(e) = EmailAddress::new(form.visitor_email.as_str()) {
        errors.insert(e);
    }

    if form.phone_number.trim().is_empty() {
        errors.insert(ValidationError::Required(FormField::PhoneNumber));
    } else if let Err(e) = PhoneNumber::new(form.phone_number.as_str()) {
        errors.insert(e);
    }

    if form.purpose_of_visit.trim().is_empty() {
        errors.insert(ValidationError::Required(FormField::PurposeOfVisit));
    }

    if form.host.trim().is_empty() {
        errors.insert(ValidationError::Required(FormField::Host));
    }

    (errors.is_empty(), errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationErrorKind;

    fn valid_form() -> VisitorFormData {
        VisitorFormData {
            visitor_name: "John Doe".to_string(),
            visitor_email: "john@x.com".to_string(),
            phone_number: "712345678".to_string(),
            country_code: "+254".to_string(),
            purpose_of_visit: "Meeting".to_string(),
            host: "raphael-mwangi".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let (ok, errors) = validate_form(&valid_form());
        assert!(ok);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_each_required_field() {
        for field in FormField::REQUIRED {
            for blank in ["", "   ", "\t\n"] {
                let mut form = valid_form();
                form.set(field, blank);

                let (ok, errors) = validate_form(&form);
                assert!(!ok, "{field} = {blank:?} should fail");
                assert_eq!(errors.len(), 1, "only {field} should fail");
                assert_eq!(
                    errors.get(field).map(|e| e.kind()),
                    Some(ValidationErrorKind::Required)
                );
            }
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let (ok, errors) = validate_form(&VisitorFormData::default());
        assert!(!ok);
        assert_eq!(errors.len(), 5);
        for field in FormField::REQUIRED {
            assert!(errors.contains(field));
        }
        assert!(!errors.contains(FormField::CountryCode));
    }

    #[test]
    fn test_email_format_kind() {
        for email in ["john", "john@x", "@x.com", "john@.com", "jo hn@x.com", "john@x."] {
            let mut form = valid_form();
            form.visitor_email = email.to_string();

            let (ok, errors) = validate_form(&form);
            assert!(!ok, "{email} should fail");
            assert_eq!(
                errors.get(FormField::VisitorEmail).map(|e| e.kind()),
                Some(ValidationErrorKind::Format),
                "{email} should be a format error"
            );
        }
    }

    #[test]
    fn test_phone_length() {
        let mut form = valid_form();
        form.phone_number = "71234567".to_string();
        let (ok, errors) = validate_form(&form);
        assert!(!ok);
        assert_eq!(
            errors.get(FormField::PhoneNumber),
            Some(&ValidationError::TooShort { min_digits: 9 })
        );

        form.phone_number = "712345678".to_string();
        let (ok, _) = validate_form(&form);
        assert!(ok);
    }

    #[test]
    fn test_loaded_phone_with_trunk_prefix() {
        // Loaded forms bypass the per-edit filter
        let mut form = valid_form();
        form.phone_number = "0712345678".to_string();
        let (ok, errors) = validate_form(&form);
        assert!(!ok);
        assert_eq!(
            errors.get(FormField::PhoneNumber).map(|e| e.kind()),
            Some(ValidationErrorKind::Format)
        );
        assert_eq!(
            errors.message(FormField::PhoneNumber).as_deref(),
            Some("Please enter a valid phone number")
        );
    }

    #[test]
    fn test_formatted_phone_accepted() {
        let mut form = valid_form();
        form.phone_number = "712 345 678".to_string();
        let (ok, _) = validate_form(&form);
        assert!(ok);
    }

    #[test]
    fn test_validation_is_pure() {
        let form = valid_form();
        let before = form.clone();
        let _ = validate_form(&form);
        assert_eq!(form, before);
    }
}
