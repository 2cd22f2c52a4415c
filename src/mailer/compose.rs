//! Notification email composition.
//!
//! Both emails are rendered from handlebars templates with HTML escaping on,
//! so applicant input can never inject markup into the admin inbox.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::application::intake::display_intake;
use crate::application::options::{
    AustralianState, Country, Course, EducationLevel, ItExperience, OptionSet,
};
use crate::application::{Field, SubmittedApplication};

const APPLICANT_TEMPLATE: &str = "applicant";
const ADMIN_TEMPLATE: &str = "admin";

pub const APPLICANT_SUBJECT: &str = "Application Received - Heubert's Job Ready Program";
pub const ADMIN_SUBJECT_PREFIX: &str = "New Course Application Received - ";

const CONTACT_EMAIL: &str = "info@heubert.com";
const CONTACT_PHONE: &str = "02 8315 7777";

/// A fully rendered email ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize)]
struct Row {
    label: &'static str,
    value: String,
    striped: bool,
}

#[derive(Debug, Serialize)]
struct Section {
    title: &'static str,
    rows: Vec<Row>,
}

impl Section {
    fn new(title: &'static str, rows: Vec<(&'static str, String)>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| Row {
                label,
                value,
                striped: i % 2 == 0,
            })
            .collect();
        Self { title, rows }
    }
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

/// Renders the applicant and admin notification emails
pub struct EmailComposer {
    handlebars: Handlebars<'static>,
}

impl EmailComposer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(APPLICANT_TEMPLATE, include_str!("templates/applicant.html.hbs"))
            .context("Failed to parse applicant email template")?;
        handlebars
            .register_template_string(ADMIN_TEMPLATE, include_str!("templates/admin.html.hbs"))
            .context("Failed to parse admin email template")?;
        Ok(Self { handlebars })
    }

    /// Acknowledgement sent to the applicant
    pub fn applicant_email(
        &self,
        application: &SubmittedApplication,
        from: &str,
    ) -> Result<OutgoingEmail> {
        let draft = application.draft();
        let context = json!({
            "name": application.applicant_name(),
            "course": Course::display_label(draft.text(Field::SelectedCourse).unwrap_or_default()),
            "contact_email": CONTACT_EMAIL,
            "contact_phone": CONTACT_PHONE,
        });
        let html = self
            .handlebars
            .render(APPLICANT_TEMPLATE, &context)
            .context("Failed to render applicant email")?;

        Ok(OutgoingEmail {
            from: from.to_string(),
            to: draft.text(Field::Email).unwrap_or_default().trim().to_string(),
            subject: APPLICANT_SUBJECT.to_string(),
            html,
        })
    }

    /// Full application details sent to the admin inbox
    pub fn admin_email(
        &self,
        application: &SubmittedApplication,
        from: &str,
        admin: &str,
    ) -> Result<OutgoingEmail> {
        let context = json!({ "sections": admin_sections(application) });
        let html = self
            .handlebars
            .render(ADMIN_TEMPLATE, &context)
            .context("Failed to render admin email")?;

        Ok(OutgoingEmail {
            from: from.to_string(),
            to: admin.to_string(),
            subject: format!("{ADMIN_SUBJECT_PREFIX}{}", application.applicant_name()),
            html,
        })
    }
}

fn admin_sections(application: &SubmittedApplication) -> Vec<Section> {
    let draft = application.draft();
    let text = |field: Field| draft.text(field).unwrap_or_default().to_string();

    let country = if draft.needs_other_country() {
        text(Field::OtherCountry)
    } else {
        Country::display_label(&text(Field::Country))
    };

    let has_experience = draft
        .text(Field::HasItExperience)
        .and_then(ItExperience::from_code)
        == Some(ItExperience::Yes);
    let mut experience_rows = vec![
        (
            "Education Level",
            EducationLevel::display_label(&text(Field::Education)),
        ),
        ("Field of Study", text(Field::FieldOfStudy)),
        ("Institution", text(Field::Institution)),
        ("IT Experience", yes_no(has_experience)),
    ];
    if has_experience {
        experience_rows.push(("Years of Experience", text(Field::YearsOfExperience)));
        experience_rows.push(("Current Job", text(Field::CurrentJob)));
    }

    vec![
        Section::new(
            "Personal Details",
            vec![
                ("Name", text(Field::Name)),
                ("Email", text(Field::Email)),
                ("Phone", text(Field::Phone)),
            ],
        ),
        Section::new(
            "Address",
            vec![
                ("Street Address", text(Field::StreetAddress)),
                ("City", text(Field::City)),
                ("State", AustralianState::display_label(&text(Field::State))),
                ("Postcode", text(Field::Postcode)),
                ("Country", country),
            ],
        ),
        Section::new("Education & Experience", experience_rows),
        Section::new(
            "Course Details",
            vec![
                (
                    "Selected Course",
                    Course::display_label(&text(Field::SelectedCourse)),
                ),
                ("Intake Date", display_intake(&text(Field::Intake))),
                ("Referrer", text(Field::Referrer)),
                (
                    "Application Date",
                    application
                        .submitted_at()
                        .format("%-d %B %Y, %H:%M:%S UTC")
                        .to_string(),
                ),
            ],
        ),
        Section::new(
            "Agreements",
            vec![
                (
                    "Accepted False Info Terms",
                    yes_no(draft.flag(Field::AcceptFalseInfo)),
                ),
                ("Accepted T&Cs", yes_no(draft.flag(Field::AcceptTerms))),
            ],
        ),
    ]
}
