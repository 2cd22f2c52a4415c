//! The five-step application wizard state machine.
//!
//! The wizard owns the draft, the inline field errors and the submission
//! status. It never performs I/O itself: submission is split into
//! [`Wizard::begin_submission`] and [`Wizard::finish_submission`] so the
//! terminal loop can keep drawing while the request is in flight, and
//! [`Wizard::submit`] composes the two for callers that can simply await.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::application::intake;
use crate::application::validate::field_error;
use crate::application::{
    ApplicationDraft, DraftError, Field, FieldErrors, FieldValue, SubmittedApplication,
    WizardStep,
};
use crate::submission::{SubmitApplication, SubmitError};


/// Submission progress of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Editing; the applicant may move between steps
    Idle,
    /// A submission request is in flight
    Submitting,
    /// The application was accepted. Terminal.
    Submitted,
}

/// Result of pressing the primary button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the given step
    Moved(WizardStep),
    /// On the last step: the frozen application is ready to send
    Submit(SubmittedApplication),
    /// The current step is invalid or a submission is in progress
    Blocked,
}

/// Result of a completed submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Back to editing with the message to show the applicant
    Failed(String),
    /// There was nothing to submit
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("the application can no longer be edited")]
    Locked,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// The application wizard
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    draft: ApplicationDraft,
    errors: FieldErrors,
    status: SubmissionStatus,
    last_error: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::first(),
            draft: ApplicationDraft::new(),
            errors: FieldErrors::new(),
            status: SubmissionStatus::Idle,
            last_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Message from the last failed submission, until dismissed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// 1-based step number for the progress line
    pub fn step_number(&self) -> usize {
        self.step.index() + 1
    }

    pub fn step_count(&self) -> usize {
        WizardStep::all().len()
    }

    /// "Step 2 of 5: Education"
    pub fn progress_label(&self) -> String {
        format!(
            "Step {} of {}: {}",
            self.step_number(),
            self.step_count(),
            self.step.title()
        )
    }

    /// Fields visible on the current step
    pub fn visible_fields(&self) -> Vec<Field> {
        self.step.fields(&self.draft)
    }

    pub fn is_step_valid(&self) -> bool {
        self.step.is_valid(&self.draft)
    }

    pub fn can_advance(&self) -> bool {
        self.status == SubmissionStatus::Idle && self.is_step_valid()
    }

    pub fn can_retreat(&self) -> bool {
        self.status == SubmissionStatus::Idle && self.step.prev().is_some()
    }

    /// Label of the primary button for the current state
    pub fn primary_label(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Submitting => "Submitting...",
            _ if self.step.is_last() => "I agree & submit",
            _ => "Next",
        }
    }

    /// Intake dates on offer for the currently selected course
    pub fn intake_candidates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        intake::intake_candidates(today, self.draft.text(Field::SelectedCourse))
    }

    /// Merge a value into the draft and refresh that field's inline error.
    ///
    /// Changing the course clears the chosen intake, since intake dates
    /// depend on the course.
    pub fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), WizardError> {
        if self.status != SubmissionStatus::Idle {
            return Err(WizardError::Locked);
        }

        let course_changed = field == Field::SelectedCourse
            && matches!(&value, FieldValue::Text(v) if self.draft.text(field) != Some(v.as_str()));

        self.draft.set(field, value)?;
        self.errors.clear(field);

        if let Some(message) = self.draft.text(field).and_then(|v| field_error(field, v)) {
            self.errors.set(field, message);
        }

        if course_changed && self.draft.text(Field::Intake).is_some() {
            tracing::debug!("Course changed, clearing selected intake");
            self.draft.clear(Field::Intake);
            self.errors.clear(Field::Intake);
        }
        Ok(())
    }

    /// Press the primary button.
    ///
    /// Moves forward when the step is valid. On the last step the draft is
    /// frozen and handed back for sending instead.
    pub fn advance(&mut self, now: DateTime<Utc>) -> AdvanceOutcome {
        if !self.can_advance() {
            return AdvanceOutcome::Blocked;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                AdvanceOutcome::Moved(next)
            }
            None => self
                .begin_submission(now)
                .map_or(AdvanceOutcome::Blocked, AdvanceOutcome::Submit),
        }
    }

    /// Go back one step without re-validating
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Freeze the draft and enter `Submitting`.
    ///
    /// Returns `None` unless on a valid last step while idle.
    pub fn begin_submission(&mut self, now: DateTime<Utc>) -> Option<SubmittedApplication> {
        if !self.step.is_last() || !self.can_advance() {
            return None;
        }
        self.status = SubmissionStatus::Submitting;
        self.last_error = None;
        Some(self.draft.clone().freeze(now))
    }

    /// Apply the result of an in-flight submission
    pub fn finish_submission(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        if self.status != SubmissionStatus::Submitting {
            return SubmitOutcome::Ignored;
        }
        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Submitted;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                let message = e.to_string();
                self.status = SubmissionStatus::Idle;
                self.last_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Submit the application through `client` and wait for the outcome
    pub async fn submit(
        &mut self,
        client: &dyn SubmitApplication,
        now: DateTime<Utc>,
    ) -> SubmitOutcome {
        let Some(application) = self.begin_submission(now) else {
            return SubmitOutcome::Ignored;
        };
        let result = client.submit(&application).await;
        self.finish_submission(result)
    }
}
