//! Field-level validators and the per-field error map.
//!
//! These run on every keystroke for the email, phone and postcode inputs.
//! They only drive inline feedback; step gating lives in [`super::step`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Field;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{9,10}$").expect("valid phone regex"));

static POSTCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid postcode regex"));

pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const PHONE_ERROR: &str = "Please enter a valid mobile number";
pub const POSTCODE_ERROR: &str = "Please enter a valid 4-digit postcode";

/// `local@domain.tld`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// 9 or 10 digits, nothing else
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Exactly 4 digits
pub fn is_valid_postcode(value: &str) -> bool {
    POSTCODE_RE.is_match(value)
}

/// Whether a field has its own inline validator
pub fn has_field_validator(field: Field) -> bool {
    matches!(field, Field::Email | Field::Phone | Field::Postcode)
}

/// Inline error for a freshly entered value.
///
/// Blank input is treated as "not entered yet" and never produces an error.
pub fn field_error(field: Field, value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return None;
    }
    match field {
        Field::Email if !is_valid_email(value) => Some(EMAIL_ERROR),
        Field::Phone if !is_valid_phone(value) => Some(PHONE_ERROR),
        Field::Postcode if !is_valid_postcode(value) => Some(POSTCODE_ERROR),
        _ => None,
    }
}

/// Inline validation messages keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validator() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jane.doe+jobs@example.com.au"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("plainstring"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[test]
    fn test_phone_validator() {
        assert!(is_valid_phone("0412345678"));
        assert!(is_valid_phone("412345678"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("04123456789"));
        assert!(!is_valid_phone("0412 345 678"));
    }

    #[test]
    fn test_postcode_validator() {
        assert!(is_valid_postcode("2000"));
        assert!(!is_valid_postcode("200"));
        assert!(!is_valid_postcode("20000"));
        assert!(!is_valid_postcode("20a0"));
    }

    #[test]
    fn test_field_error_skips_blank_values() {
        assert_eq!(field_error(Field::Email, ""), None);
        assert_eq!(field_error(Field::Phone, "   "), None);
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(field_error(Field::Email, "nope"), Some(EMAIL_ERROR));
        assert_eq!(field_error(Field::Phone, "123"), Some(PHONE_ERROR));
        assert_eq!(field_error(Field::Postcode, "20"), Some(POSTCODE_ERROR));
        assert_eq!(field_error(Field::Postcode, "2000"), None);
        assert_eq!(field_error(Field::Name, "anything"), None);
    }

    #[test]
    fn test_field_errors_set_and_clear() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.set(Field::Email, EMAIL_ERROR);
        assert_eq!(errors.get(Field::Email), Some(EMAIL_ERROR));
        assert_eq!(errors.len(), 1);

        errors.clear(Field::Email);
        assert!(errors.get(Field::Email).is_none());
        assert!(errors.is_empty());
    }
}
