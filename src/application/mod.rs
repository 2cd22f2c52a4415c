//! Application draft model for the Job Ready Program wizard.
//!
//! The draft is built field by field while the applicant walks through the
//! wizard. Once submitted it is frozen into a [`SubmittedApplication`], which
//! is the only type carrying a submission timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub mod intake;
pub mod options;
pub mod step;
pub mod validate;

use options::OptionSet;

pub use step::WizardStep;
pub use validate::FieldErrors;

/// Every field the applicant can fill in, in wizard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Phone,
    StreetAddress,
    City,
    State,
    Postcode,
    Education,
    FieldOfStudy,
    Institution,
    Country,
    OtherCountry,
    HasItExperience,
    YearsOfExperience,
    CurrentJob,
    SelectedCourse,
    Intake,
    Referrer,
    AcceptFalseInfo,
    AcceptTerms,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::StreetAddress,
            Field::City,
            Field::State,
            Field::Postcode,
            Field::Education,
            Field::FieldOfStudy,
            Field::Institution,
            Field::Country,
            Field::OtherCountry,
            Field::HasItExperience,
            Field::YearsOfExperience,
            Field::CurrentJob,
            Field::SelectedCourse,
            Field::Intake,
            Field::Referrer,
            Field::AcceptFalseInfo,
            Field::AcceptTerms,
        ]
    }

    /// Name of the field in the JSON payload
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::StreetAddress => "streetAddress",
            Field::City => "city",
            Field::State => "state",
            Field::Postcode => "postcode",
            Field::Education => "education",
            Field::FieldOfStudy => "fieldOfStudy",
            Field::Institution => "institution",
            Field::Country => "country",
            Field::OtherCountry => "otherCountry",
            Field::HasItExperience => "hasITExperience",
            Field::YearsOfExperience => "yearsOfExperience",
            Field::CurrentJob => "currentJob",
            Field::SelectedCourse => "selectedCourse",
            Field::Intake => "intake",
            Field::Referrer => "referrer",
            Field::AcceptFalseInfo => "acceptFalseInfo",
            Field::AcceptTerms => "acceptTerms",
        }
    }

    /// Form label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name *",
            Field::Email => "Email Address *",
            Field::Phone => "Mobile Number *",
            Field::StreetAddress => "Street Address *",
            Field::City => "City/Suburb *",
            Field::State => "State *",
            Field::Postcode => "Postcode *",
            Field::Education => "Highest Level of Education *",
            Field::FieldOfStudy => "Course Name *",
            Field::Institution => "Institution *",
            Field::Country => "Country *",
            Field::OtherCountry => "Please specify country *",
            Field::HasItExperience => "Do you have experience in IT? *",
            Field::YearsOfExperience => "Years of Work Experience *",
            Field::CurrentJob => "Current/Most Recent Job Title *",
            Field::SelectedCourse => "Course *",
            Field::Intake => "Intake *",
            Field::Referrer => "Referrer (optional)",
            Field::AcceptFalseInfo => "I understand giving false or misleading information is a serious offence",
            Field::AcceptTerms => "I have read and accept the terms and conditions and refund policy",
        }
    }

    /// Whether the field holds a checkbox value rather than text
    pub fn is_flag(&self) -> bool {
        matches!(self, Field::AcceptFalseInfo | Field::AcceptTerms)
    }

    /// Input length limit for free-text fields
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Field::Phone => Some(10),
            Field::Postcode => Some(4),
            Field::Institution | Field::OtherCountry => Some(50),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}

/// A value entered by the applicant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Errors raised when editing a draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch {
        field: Field,
        expected: &'static str,
    },
}

/// The in-progress application, built incrementally across the wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Australian state code (e.g. "nsw")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Education level code (e.g. "bachelor")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Country code, or "other" with `other_country` holding the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_country: Option<String>,
    /// "yes" or "no"
    #[serde(
        default,
        rename = "hasITExperience",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_it_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_job: Option<String>,
    /// Course code (e.g. "helpdesk-l1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_course: Option<String>,
    /// ISO-8601 intake date picked from the generated candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intake: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_false_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_terms: Option<bool>,
}

impl ApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_slot(&self, field: Field) -> Option<&Option<String>> {
        let slot = match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::StreetAddress => &self.street_address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Postcode => &self.postcode,
            Field::Education => &self.education,
            Field::FieldOfStudy => &self.field_of_study,
            Field::Institution => &self.institution,
            Field::Country => &self.country,
            Field::OtherCountry => &self.other_country,
            Field::HasItExperience => &self.has_it_experience,
            Field::YearsOfExperience => &self.years_of_experience,
            Field::CurrentJob => &self.current_job,
            Field::SelectedCourse => &self.selected_course,
            Field::Intake => &self.intake,
            Field::Referrer => &self.referrer,
            Field::AcceptFalseInfo | Field::AcceptTerms => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::StreetAddress => &mut self.street_address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Postcode => &mut self.postcode,
            Field::Education => &mut self.education,
            Field::FieldOfStudy => &mut self.field_of_study,
            Field::Institution => &mut self.institution,
            Field::Country => &mut self.country,
            Field::OtherCountry => &mut self.other_country,
            Field::HasItExperience => &mut self.has_it_experience,
            Field::YearsOfExperience => &mut self.years_of_experience,
            Field::CurrentJob => &mut self.current_job,
            Field::SelectedCourse => &mut self.selected_course,
            Field::Intake => &mut self.intake,
            Field::Referrer => &mut self.referrer,
            Field::AcceptFalseInfo | Field::AcceptTerms => return None,
        };
        Some(slot)
    }

    /// Text value of a field, `None` for unset fields and checkboxes
    pub fn text(&self, field: Field) -> Option<&str> {
        self.text_slot(field).and_then(|slot| slot.as_deref())
    }

    /// Checkbox value of a field; unset and text fields read as `false`
    pub fn flag(&self, field: Field) -> bool {
        match field {
            Field::AcceptFalseInfo => self.accept_false_info == Some(true),
            Field::AcceptTerms => self.accept_terms == Some(true),
            _ => false,
        }
    }

    /// Whether a text field holds something other than whitespace
    pub fn is_filled(&self, field: Field) -> bool {
        self.text(field).is_some_and(|v| !v.trim().is_empty())
    }

    /// Merge a value into the draft
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), DraftError> {
        match (field, value) {
            (Field::AcceptFalseInfo, FieldValue::Flag(v)) => self.accept_false_info = Some(v),
            (Field::AcceptTerms, FieldValue::Flag(v)) => self.accept_terms = Some(v),
            (field, FieldValue::Flag(_)) => {
                return Err(DraftError::TypeMismatch {
                    field,
                    expected: "text",
                })
            }
            (field, FieldValue::Text(v)) => {
                let slot = self
                    .text_slot_mut(field)
                    .ok_or(DraftError::TypeMismatch {
                        field,
                        expected: "checkbox",
                    })?;
                *slot = Some(v);
            }
        }
        Ok(())
    }

    /// Remove a field's value entirely
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::AcceptFalseInfo => self.accept_false_info = None,
            Field::AcceptTerms => self.accept_terms = None,
            _ => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = None;
                }
            }
        }
    }

    /// The applicant picked "Other" and must name the country
    pub fn needs_other_country(&self) -> bool {
        self.country.as_deref() == Some(options::Country::Other.code())
    }

    /// The applicant reported IT experience, so the job details apply
    pub fn reports_it_experience(&self) -> bool {
        self.has_it_experience.as_deref() == Some(options::ItExperience::Yes.code())
    }

    /// Whether every step of the wizard validates
    pub fn is_complete(&self) -> bool {
        self.first_incomplete_step().is_none()
    }

    /// The earliest step whose validator rejects this draft
    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        WizardStep::all()
            .iter()
            .copied()
            .find(|step| !step.is_valid(self))
    }

    /// Freeze the draft for sending, stamping the submission time.
    ///
    /// Conditional fields whose trigger is inactive are dropped so stale
    /// answers never reach the notification emails.
    pub fn freeze(mut self, submitted_at: DateTime<Utc>) -> SubmittedApplication {
        if !self.needs_other_country() {
            self.other_country = None;
        }
        if !self.reports_it_experience() {
            self.years_of_experience = None;
            self.current_job = None;
        }
        SubmittedApplication {
            draft: self,
            submitted_at,
        }
    }
}

/// A frozen application as sent to the submission endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    #[serde(flatten)]
    draft: ApplicationDraft,
    submitted_at: DateTime<Utc>,
}

impl SubmittedApplication {
    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Applicant name as entered, empty when missing
    pub fn applicant_name(&self) -> &str {
        self.draft.text(Field::Name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_keys_round_trip_through_from_str() {
        for field in Field::all() {
            assert_eq!(field.key().parse::<Field>().unwrap(), *field);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "favouriteColour".parse::<Field>().unwrap_err();
        assert_eq!(err, DraftError::UnknownField("favouriteColour".to_string()));
    }

    #[test]
    fn test_set_rejects_mismatched_value_types() {
        let mut draft = ApplicationDraft::new();
        assert!(matches!(
            draft.set(Field::Name, FieldValue::Flag(true)),
            Err(DraftError::TypeMismatch { expected: "text", .. })
        ));
        assert!(matches!(
            draft.set(Field::AcceptTerms, "yes".into()),
            Err(DraftError::TypeMismatch {
                expected: "checkbox",
                ..
            })
        ));
    }

    #[test]
    fn test_flag_requires_strict_true() {
        let mut draft = ApplicationDraft::new();
        assert!(!draft.flag(Field::AcceptTerms));
        draft.set(Field::AcceptTerms, false.into()).unwrap();
        assert!(!draft.flag(Field::AcceptTerms));
        draft.set(Field::AcceptTerms, true.into()).unwrap();
        assert!(draft.flag(Field::AcceptTerms));
    }

    #[test]
    fn test_is_filled_ignores_whitespace() {
        let mut draft = ApplicationDraft::new();
        draft.set(Field::City, "   ".into()).unwrap();
        assert!(!draft.is_filled(Field::City));
        draft.set(Field::City, "Sydney".into()).unwrap();
        assert!(draft.is_filled(Field::City));
    }

    #[test]
    fn test_serializes_with_original_wire_names() {
        let mut draft = ApplicationDraft::new();
        draft.set(Field::HasItExperience, "yes".into()).unwrap();
        draft.set(Field::StreetAddress, "1 George St".into()).unwrap();
        draft.set(Field::AcceptFalseInfo, true.into()).unwrap();

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["hasITExperience"], "yes");
        assert_eq!(json["streetAddress"], "1 George St");
        assert_eq!(json["acceptFalseInfo"], true);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_freeze_stamps_time_and_drops_inactive_conditionals() {
        let mut draft = ApplicationDraft::new();
        draft.set(Field::Country, "au".into()).unwrap();
        draft.set(Field::OtherCountry, "Fiji".into()).unwrap();
        draft.set(Field::HasItExperience, "no".into()).unwrap();
        draft.set(Field::CurrentJob, "Barista".into()).unwrap();

        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let submitted = draft.freeze(at);

        assert_eq!(submitted.submitted_at(), at);
        assert_eq!(submitted.draft().other_country, None);
        assert_eq!(submitted.draft().current_job, None);
        assert_eq!(submitted.draft().country.as_deref(), Some("au"));

        let json = serde_json::to_value(&submitted).unwrap();
        assert_eq!(json["submittedAt"], "2026-10-18T09:30:00Z");
        assert_eq!(json["country"], "au");
    }

    #[test]
    fn test_freeze_keeps_active_conditionals() {
        let mut draft = ApplicationDraft::new();
        draft.set(Field::Country, "other".into()).unwrap();
        draft.set(Field::OtherCountry, "Fiji".into()).unwrap();
        draft.set(Field::HasItExperience, "yes".into()).unwrap();
        draft.set(Field::YearsOfExperience, "3".into()).unwrap();

        let submitted = draft.freeze(Utc::now());
        assert_eq!(submitted.draft().other_country.as_deref(), Some("Fiji"));
        assert_eq!(submitted.draft().years_of_experience.as_deref(), Some("3"));
    }

    #[test]
    fn test_first_incomplete_step() {
        let mut draft = ApplicationDraft::new();
        assert_eq!(draft.first_incomplete_step(), Some(WizardStep::Personal));
        assert!(!draft.is_complete());

        for (field, value) in [
            (Field::Name, "Ada Lovelace"),
            (Field::Email, "ada@example.com"),
            (Field::Phone, "0412345678"),
            (Field::StreetAddress, "1 George St"),
            (Field::City, "Sydney"),
            (Field::State, "nsw"),
            (Field::Postcode, "2000"),
        ] {
            draft.set(field, value.into()).unwrap();
        }
        assert_eq!(draft.first_incomplete_step(), Some(WizardStep::Education));
    }

    #[test]
    fn test_submitted_application_deserializes_flat_payload() {
        let payload = serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "acceptTerms": true,
            "submittedAt": "2026-10-18T09:30:00.000Z"
        });
        let submitted: SubmittedApplication = serde_json::from_value(payload).unwrap();
        assert_eq!(submitted.applicant_name(), "Ada Lovelace");
        assert_eq!(submitted.draft().accept_terms, Some(true));
    }
}
