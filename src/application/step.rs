//! The five wizard steps and their validators.

use super::options::{ItExperience, OptionSet};
use super::validate::{is_valid_email, is_valid_phone, is_valid_postcode};
use super::{ApplicationDraft, Field};

/// Steps of the application wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Name, contact details and address
    Personal,
    /// Highest qualification and where it was obtained
    Education,
    /// IT experience, with job details when applicable
    Experience,
    /// Course and intake date
    Course,
    /// Declarations
    Terms,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Personal,
            WizardStep::Education,
            WizardStep::Experience,
            WizardStep::Course,
            WizardStep::Terms,
        ]
    }

    pub fn first() -> Self {
        WizardStep::Personal
    }

    pub fn last() -> Self {
        WizardStep::Terms
    }

    /// Zero-based position in the wizard
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Personal => 0,
            WizardStep::Education => 1,
            WizardStep::Experience => 2,
            WizardStep::Course => 3,
            WizardStep::Terms => 4,
        }
    }

    pub fn is_last(&self) -> bool {
        *self == Self::last()
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::all().get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::all().get(i).copied())
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal Information",
            WizardStep::Education => "Education",
            WizardStep::Experience => "Work Experience",
            WizardStep::Course => "Course Selection",
            WizardStep::Terms => "Terms and Conditions",
        }
    }

    /// Fields shown on this step for the current draft.
    ///
    /// Conditional fields appear only while their trigger is active.
    pub fn fields(&self, draft: &ApplicationDraft) -> Vec<Field> {
        match self {
            WizardStep::Personal => vec![
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::StreetAddress,
                Field::City,
                Field::State,
                Field::Postcode,
            ],
            WizardStep::Education => {
                let mut fields = vec![
                    Field::Education,
                    Field::FieldOfStudy,
                    Field::Institution,
                    Field::Country,
                ];
                if draft.needs_other_country() {
                    fields.push(Field::OtherCountry);
                }
                fields
            }
            WizardStep::Experience => {
                let mut fields = vec![Field::HasItExperience];
                if draft.reports_it_experience() {
                    fields.push(Field::YearsOfExperience);
                    fields.push(Field::CurrentJob);
                }
                fields
            }
            WizardStep::Course => {
                let mut fields = vec![Field::SelectedCourse];
                if draft.is_filled(Field::SelectedCourse) {
                    fields.push(Field::Intake);
                }
                fields.push(Field::Referrer);
                fields
            }
            WizardStep::Terms => vec![Field::AcceptFalseInfo, Field::AcceptTerms],
        }
    }

    /// Whether the draft satisfies everything this step requires
    pub fn is_valid(&self, draft: &ApplicationDraft) -> bool {
        match self {
            WizardStep::Personal => {
                let matches = |field: Field, check: fn(&str) -> bool| {
                    draft.is_filled(field) && draft.text(field).is_some_and(check)
                };
                draft.is_filled(Field::Name)
                    && matches(Field::Email, is_valid_email)
                    && matches(Field::Phone, is_valid_phone)
                    && draft.is_filled(Field::StreetAddress)
                    && draft.is_filled(Field::City)
                    && draft.is_filled(Field::State)
                    && matches(Field::Postcode, is_valid_postcode)
            }
            WizardStep::Education => {
                draft.is_filled(Field::Education)
                    && draft.is_filled(Field::FieldOfStudy)
                    && draft.is_filled(Field::Institution)
                    && draft.is_filled(Field::Country)
                    && (!draft.needs_other_country() || draft.is_filled(Field::OtherCountry))
            }
            WizardStep::Experience => {
                if draft.reports_it_experience() {
                    draft.is_filled(Field::YearsOfExperience) && draft.is_filled(Field::CurrentJob)
                } else {
                    draft.text(Field::HasItExperience) == Some(ItExperience::No.code())
                }
            }
            WizardStep::Course => {
                draft.is_filled(Field::SelectedCourse) && draft.is_filled(Field::Intake)
            }
            WizardStep::Terms => {
                draft.flag(Field::AcceptFalseInfo) && draft.flag(Field::AcceptTerms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FieldValue;

    fn draft_with(values: &[(Field, FieldValue)]) -> ApplicationDraft {
        let mut draft = ApplicationDraft::new();
        for (field, value) in values {
            draft.set(*field, value.clone()).unwrap();
        }
        draft
    }

    fn personal_draft() -> ApplicationDraft {
        draft_with(&[
            (Field::Name, "Ada Lovelace".into()),
            (Field::Email, "ada@example.com".into()),
            (Field::Phone, "0412345678".into()),
            (Field::StreetAddress, "1 George St".into()),
            (Field::City, "Sydney".into()),
            (Field::State, "nsw".into()),
            (Field::Postcode, "2000".into()),
        ])
    }

    fn education_draft(country: &str) -> ApplicationDraft {
        draft_with(&[
            (Field::Education, "bachelor".into()),
            (Field::FieldOfStudy, "Computer Science".into()),
            (Field::Institution, "UNSW".into()),
            (Field::Country, country.into()),
        ])
    }

    #[test]
    fn test_step_order_and_navigation() {
        assert_eq!(WizardStep::all().len(), 5);
        assert_eq!(WizardStep::first().prev(), None);
        assert_eq!(WizardStep::last().next(), None);
        assert_eq!(WizardStep::Personal.next(), Some(WizardStep::Education));
        assert_eq!(WizardStep::Terms.prev(), Some(WizardStep::Course));
        for (i, step) in WizardStep::all().iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn test_personal_step_requires_valid_formats() {
        let mut draft = personal_draft();
        assert!(WizardStep::Personal.is_valid(&draft));

        draft.set(Field::Postcode, "200".into()).unwrap();
        assert!(!WizardStep::Personal.is_valid(&draft));

        let mut draft = personal_draft();
        draft.set(Field::Email, "a@b".into()).unwrap();
        assert!(!WizardStep::Personal.is_valid(&draft));

        let mut draft = personal_draft();
        draft.set(Field::Phone, "04123456789".into()).unwrap();
        assert!(!WizardStep::Personal.is_valid(&draft));

        let mut draft = personal_draft();
        draft.set(Field::City, "  ".into()).unwrap();
        assert!(!WizardStep::Personal.is_valid(&draft));
    }

    #[test]
    fn test_education_other_country_required_only_for_other() {
        let draft = education_draft("au");
        assert!(WizardStep::Education.is_valid(&draft));

        let mut draft = education_draft("other");
        assert!(!WizardStep::Education.is_valid(&draft));
        draft.set(Field::OtherCountry, "   ".into()).unwrap();
        assert!(!WizardStep::Education.is_valid(&draft));
        draft.set(Field::OtherCountry, "Fiji".into()).unwrap();
        assert!(WizardStep::Education.is_valid(&draft));
    }

    #[test]
    fn test_education_ignores_other_country_for_named_countries() {
        for country in ["au", "np", "in", "us", "uk", "ca"] {
            let mut draft = education_draft(country);
            assert!(WizardStep::Education.is_valid(&draft));
            draft.set(Field::OtherCountry, String::new().into()).unwrap();
            assert!(WizardStep::Education.is_valid(&draft));
        }
    }

    #[test]
    fn test_experience_no_ignores_job_fields() {
        let cases: [&[(Field, FieldValue)]; 3] = [
            &[],
            &[(Field::YearsOfExperience, "".into())],
            &[
                (Field::YearsOfExperience, "5".into()),
                (Field::CurrentJob, "Analyst".into()),
            ],
        ];
        for extra in cases {
            let mut draft = draft_with(extra);
            draft.set(Field::HasItExperience, "no".into()).unwrap();
            assert!(WizardStep::Experience.is_valid(&draft));
        }
    }

    #[test]
    fn test_experience_yes_requires_job_fields() {
        let mut draft = draft_with(&[(Field::HasItExperience, "yes".into())]);
        assert!(!WizardStep::Experience.is_valid(&draft));

        draft.set(Field::YearsOfExperience, "2".into()).unwrap();
        assert!(!WizardStep::Experience.is_valid(&draft));

        draft.set(Field::CurrentJob, "Support Analyst".into()).unwrap();
        assert!(WizardStep::Experience.is_valid(&draft));
    }

    #[test]
    fn test_experience_requires_an_answer() {
        assert!(!WizardStep::Experience.is_valid(&ApplicationDraft::new()));
        let draft = draft_with(&[(Field::HasItExperience, "maybe".into())]);
        assert!(!WizardStep::Experience.is_valid(&draft));
    }

    #[test]
    fn test_experience_answer_must_match_code_exactly() {
        let mut draft = draft_with(&[(Field::HasItExperience, "YES".into())]);
        assert_eq!(
            WizardStep::Experience.fields(&draft),
            vec![Field::HasItExperience]
        );
        assert!(!WizardStep::Experience.is_valid(&draft));

        draft.set(Field::YearsOfExperience, "4".into()).unwrap();
        draft.set(Field::CurrentJob, "Analyst".into()).unwrap();
        assert!(!WizardStep::Experience.is_valid(&draft));

        let frozen = draft.clone().freeze(chrono::Utc::now());
        assert_eq!(frozen.draft().years_of_experience, None);
        assert_eq!(frozen.draft().current_job, None);

        draft.set(Field::HasItExperience, " no ".into()).unwrap();
        assert!(!WizardStep::Experience.is_valid(&draft));
    }

    #[test]
    fn test_other_country_answer_must_match_code_exactly() {
        let mut draft = education_draft("OTHER");
        assert!(!WizardStep::Education.fields(&draft).contains(&Field::OtherCountry));
        assert!(WizardStep::Education.is_valid(&draft));

        draft.set(Field::OtherCountry, "Fiji".into()).unwrap();
        let frozen = draft.freeze(chrono::Utc::now());
        assert_eq!(frozen.draft().other_country, None);
    }

    #[test]
    fn test_course_step() {
        let mut draft = draft_with(&[(Field::SelectedCourse, "helpdesk-l1".into())]);
        assert!(!WizardStep::Course.is_valid(&draft));
        draft.set(Field::Intake, "2026-10-25".into()).unwrap();
        assert!(WizardStep::Course.is_valid(&draft));
    }

    #[test]
    fn test_terms_require_both_declarations() {
        let mut draft = draft_with(&[
            (Field::AcceptFalseInfo, true.into()),
            (Field::AcceptTerms, false.into()),
        ]);
        assert!(!WizardStep::Terms.is_valid(&draft));

        draft.set(Field::AcceptTerms, true.into()).unwrap();
        assert!(WizardStep::Terms.is_valid(&draft));
    }

    #[test]
    fn test_conditional_fields_visibility() {
        let draft = education_draft("other");
        assert!(WizardStep::Education.fields(&draft).contains(&Field::OtherCountry));

        let draft = education_draft("in");
        assert!(!WizardStep::Education.fields(&draft).contains(&Field::OtherCountry));

        let draft = draft_with(&[(Field::HasItExperience, "yes".into())]);
        assert_eq!(
            WizardStep::Experience.fields(&draft),
            vec![Field::HasItExperience, Field::YearsOfExperience, Field::CurrentJob]
        );

        let empty = ApplicationDraft::new();
        assert_eq!(
            WizardStep::Course.fields(&empty),
            vec![Field::SelectedCourse, Field::Referrer]
        );
    }
}
