//! Application wizard screen

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::KeyCode;

use crate::application::intake::{format_intake, intake_value};
use crate::application::options::{
    AustralianState, Country, Course, EducationLevel, ItExperience, OptionSet,
};
use crate::application::{Field, FieldValue, SubmittedApplication};
use crate::submission::SubmitError;
use crate::ui::dialogs::AlertDialog;
use crate::ui::form_field::{Choice, FormField};
use crate::wizard::{AdvanceOutcome, SubmissionStatus, SubmitOutcome, Wizard};

mod steps;


/// What the app should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// Send this application and report back via [`WizardScreen::finish_submission`]
    Submit(SubmittedApplication),
    Quit,
}

/// Full-screen wizard that walks the applicant through the five steps
pub struct WizardScreen {
    pub(crate) wizard: Wizard,
    /// One widget per field, kept across steps so answers survive navigation
    pub(crate) widgets: BTreeMap<Field, FormField>,
    /// Index into the visible fields of the current step
    pub(crate) focused: usize,
    /// Date intake candidates are computed from
    pub(crate) today: NaiveDate,
    pub(crate) alert: AlertDialog,
}

fn choices<T: OptionSet>() -> Vec<Choice> {
    T::all()
        .iter()
        .map(|option| Choice::new(option.code(), option.label()))
        .collect()
}

fn widget_for(field: Field) -> FormField {
    match field {
        Field::State => FormField::select(choices::<AustralianState>(), "Select state"),
        Field::Education => FormField::select(choices::<EducationLevel>(), "Select education"),
        Field::Country => FormField::select(choices::<Country>(), "Select country"),
        Field::HasItExperience => FormField::select(choices::<ItExperience>(), "Select an option"),
        Field::SelectedCourse => FormField::select(choices::<Course>(), "Select a course"),
        Field::Intake => FormField::select(Vec::new(), "Select intake"),
        Field::AcceptFalseInfo | Field::AcceptTerms => FormField::toggle(),
        Field::YearsOfExperience => FormField::text("e.g. 3", field.max_length()),
        Field::Referrer => FormField::text("Who told you about us?", field.max_length()),
        _ => FormField::text("", field.max_length()),
    }
}

impl WizardScreen {
    pub fn new(today: NaiveDate) -> Self {
        let widgets = Field::all()
            .iter()
            .map(|&field| (field, widget_for(field)))
            .collect();
        Self {
            wizard: Wizard::new(),
            widgets,
            focused: 0,
            today,
            alert: AlertDialog::new("Submission failed"),
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Field that currently has keyboard focus
    pub fn focused_field(&self) -> Option<Field> {
        self.wizard.visible_fields().get(self.focused).copied()
    }

    pub fn is_submitted(&self) -> bool {
        self.wizard.status() == SubmissionStatus::Submitted
    }

    pub fn next_field(&mut self) {
        let count = self.wizard.visible_fields().len();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.wizard.visible_fields().len();
        if count > 0 {
            self.focused = (self.focused + count - 1) % count;
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyCode, now: DateTime<Utc>) -> ScreenAction {
        if self.alert.visible {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.alert.hide();
                self.wizard.dismiss_error();
            }
            return ScreenAction::None;
        }

        match self.wizard.status() {
            SubmissionStatus::Submitted => {
                return match key {
                    KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => ScreenAction::Quit,
                    _ => ScreenAction::None,
                };
            }
            SubmissionStatus::Submitting => return ScreenAction::None,
            SubmissionStatus::Idle => {}
        }

        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.prev_field();
                ScreenAction::None
            }
            KeyCode::Enter => match self.wizard.advance(now) {
                AdvanceOutcome::Moved(step) => {
                    tracing::debug!(step = step.title(), "Moved to next step");
                    self.focused = 0;
                    ScreenAction::None
                }
                AdvanceOutcome::Submit(application) => ScreenAction::Submit(application),
                AdvanceOutcome::Blocked => ScreenAction::None,
            },
            KeyCode::Esc => {
                if self.wizard.retreat() {
                    self.focused = 0;
                }
                ScreenAction::None
            }
            other => {
                self.edit_focused(other);
                ScreenAction::None
            }
        }
    }

    fn edit_focused(&mut self, key: KeyCode) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(widget) = self.widgets.get_mut(&field) else {
            return;
        };
        if !widget.handle_key(key) {
            return;
        }
        let value = widget.value();
        if let Err(e) = self.wizard.set_field(field, value) {
            tracing::warn!(field = %field, error = %e, "Field update refused");
            return;
        }

        if field == Field::SelectedCourse {
            self.refresh_intake_options();
        }

        // Conditional fields may have disappeared
        let count = self.wizard.visible_fields().len();
        if self.focused >= count {
            self.focused = count.saturating_sub(1);
        }
    }

    /// Rebuild the intake selector for the selected course, keeping the
    /// current intake if it is still on offer
    pub(crate) fn refresh_intake_options(&mut self) {
        let options = self
            .wizard
            .intake_candidates(self.today)
            .into_iter()
            .map(|date| Choice::new(intake_value(date), format_intake(date)))
            .collect();
        let mut widget = FormField::select(options, "Select intake");
        if let Some(current) = self.wizard.draft().text(Field::Intake) {
            widget.set_value(&FieldValue::Text(current.to_string()));
        }
        self.widgets.insert(Field::Intake, widget);
    }

    /// Apply the result of a submission started from [`ScreenAction::Submit`]
    pub fn finish_submission(&mut self, result: Result<(), SubmitError>) {
        match self.wizard.finish_submission(result) {
            SubmitOutcome::Submitted => {
                tracing::info!("Application submitted");
            }
            SubmitOutcome::Failed(message) => {
                tracing::warn!(error = %message, "Application submission failed");
                self.alert.show(message);
            }
            SubmitOutcome::Ignored => {}
        }
    }
}
