//! Two-step campaign form session.
//!
//! The session owns the draft plus two independent error stores: one filled
//! when leaving a step and one filled on submit. Field edits clear the edited
//! field's message from both stores without re-validating.

use crate::domain::{
    CampaignDraft, CampaignSubmission, ReferenceData, WeeklySchedule, Weekday,
    DEFAULT_WINDOW_END, DEFAULT_WINDOW_START,
};
use crate::rules::{sync_enabled_days, FieldKey, Step, ValidationErrors, Validator};
use crate::time::local_timezone_name;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Values a fresh draft starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub timezone: String,
    pub window_start: String,
    pub window_end: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            timezone: local_timezone_name(),
            window_start: DEFAULT_WINDOW_START.to_string(),
            window_end: DEFAULT_WINDOW_END.to_string(),
        }
    }
}

impl FormDefaults {
    pub fn draft(&self) -> CampaignDraft {
        CampaignDraft::with_schedule(
            self.timezone.clone(),
            WeeklySchedule::uniform(&self.window_start, &self.window_end),
        )
    }
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(String),
    IvrProfile(String),
    CallerId(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Timezone(String),
    MaxAttempts(i32),
    RetryInterval(String),
    ConcurrencyLimit(i32),
    DayEnabled { day: Weekday, enabled: bool },
    DayStartTime { day: Weekday, time: String },
    DayEndTime { day: Weekday, time: String },
}

impl FieldUpdate {
    /// Error keys an edit invalidates.
    pub fn cleared_fields(&self) -> Vec<FieldKey> {
        match self {
            FieldUpdate::Name(_) => vec![FieldKey::Name],
            FieldUpdate::IvrProfile(_) => vec![FieldKey::Ivr],
            FieldUpdate::CallerId(_) => vec![FieldKey::PhoneNumber],
            FieldUpdate::StartDate(_) => vec![FieldKey::StartDate],
            FieldUpdate::EndDate(_) => vec![FieldKey::EndDate],
            FieldUpdate::Timezone(_) => Vec::new(),
            FieldUpdate::MaxAttempts(_) => vec![FieldKey::MaxAttempts],
            FieldUpdate::RetryInterval(_) => vec![FieldKey::RetryInterval],
            FieldUpdate::ConcurrencyLimit(_) => vec![FieldKey::ConcurrencyLimit],
            FieldUpdate::DayEnabled { day, .. } => vec![FieldKey::Schedule, FieldKey::Day(*day)],
            FieldUpdate::DayStartTime { day, .. } | FieldUpdate::DayEndTime { day, .. } => {
                vec![FieldKey::Day(*day)]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Advanced { step: Step },
    Blocked { errors: usize },
    /// The last step validated cleanly; only submit remains.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Submitted,
    Rejected { errors: usize },
    AlreadySubmitted,
}

/// Message shown for `field`.
///
/// Submit errors win once a submit has been attempted; otherwise the step
/// store is used.
pub fn visible_error<'a>(
    field: FieldKey,
    step_errors: &'a ValidationErrors,
    submit_errors: &'a ValidationErrors,
    submit_attempted: bool,
) -> Option<&'a str> {
    if submit_attempted {
        if let Some(message) = submit_errors.get(field) {
            return Some(message);
        }
    }
    step_errors.get(field)
}

pub struct CampaignForm<F>
where
    F: FnOnce(CampaignSubmission),
{
    draft: CampaignDraft,
    step: Step,
    step_errors: ValidationErrors,
    submit_errors: ValidationErrors,
    submit_attempted: bool,
    today: NaiveDate,
    reference: ReferenceData,
    on_complete: Option<F>,
}

impl<F> CampaignForm<F>
where
    F: FnOnce(CampaignSubmission),
{
    pub fn open(
        defaults: &FormDefaults,
        reference: ReferenceData,
        today: NaiveDate,
        on_complete: F,
    ) -> Self {
        Self::with_draft(defaults.draft(), reference, today, on_complete)
    }

    /// Starts from an existing draft. Derivation is not re-run on load.
    pub fn with_draft(
        draft: CampaignDraft,
        reference: ReferenceData,
        today: NaiveDate,
        on_complete: F,
    ) -> Self {
        Self {
            draft,
            step: Step::Details,
            step_errors: ValidationErrors::new(),
            submit_errors: ValidationErrors::new(),
            submit_attempted: false,
            today,
            reference,
            on_complete: Some(on_complete),
        }
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn step_errors(&self) -> &ValidationErrors {
        &self.step_errors
    }

    pub fn submit_errors(&self) -> &ValidationErrors {
        &self.submit_errors
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn is_submitted(&self) -> bool {
        self.on_complete.is_none()
    }

    pub fn error_for(&self, field: FieldKey) -> Option<&str> {
        visible_error(
            field,
            &self.step_errors,
            &self.submit_errors,
            self.submit_attempted,
        )
    }

    /// Every message currently on screen.
    pub fn visible_errors(&self) -> ValidationErrors {
        let mut fields = self.step_errors.fields();
        if self.submit_attempted {
            fields.extend(self.submit_errors.fields());
        }
        let mut visible = ValidationErrors::new();
        for field in fields {
            if let Some(message) = self.error_for(field) {
                visible.insert(field, message);
            }
        }
        visible
    }

    /// Applies one edit. Returns true when the weekday flags were re-derived.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        for field in update.cleared_fields() {
            self.step_errors.remove(field);
            self.submit_errors.remove(field);
        }

        let mut dates_changed = false;
        match update {
            FieldUpdate::Name(value) => self.draft.name = value,
            FieldUpdate::IvrProfile(value) => self.draft.ivr_profile = value.trim().to_string(),
            FieldUpdate::CallerId(value) => self.draft.caller_id = value.trim().to_string(),
            FieldUpdate::StartDate(value) => {
                self.draft.start_date = value;
                dates_changed = true;
            }
            FieldUpdate::EndDate(value) => {
                self.draft.end_date = value;
                dates_changed = true;
            }
            FieldUpdate::Timezone(value) => self.draft.timezone = value,
            FieldUpdate::MaxAttempts(value) => self.draft.max_attempts = value,
            FieldUpdate::RetryInterval(value) => self.draft.retry_interval = value,
            FieldUpdate::ConcurrencyLimit(value) => self.draft.concurrency_limit = value,
            FieldUpdate::DayEnabled { day, enabled } => {
                self.draft.weekly_schedule.day_mut(day).enabled = enabled;
            }
            FieldUpdate::DayStartTime { day, time } => {
                self.draft.weekly_schedule.day_mut(day).start_time = time;
            }
            FieldUpdate::DayEndTime { day, time } => {
                self.draft.weekly_schedule.day_mut(day).end_time = time;
            }
        }

        if !dates_changed {
            return false;
        }
        let derived = sync_enabled_days(
            &mut self.draft.weekly_schedule,
            self.draft.start_date,
            self.draft.end_date,
        );
        if derived {
            debug!(
                enabled = self.draft.weekly_schedule.enabled_days().len(),
                "weekdays derived from date range"
            );
        }
        derived
    }

    /// Validates the current step and moves forward when it is clean.
    pub fn next(&mut self) -> StepOutcome {
        self.step_errors = self.validator().validate_step(&self.draft, self.step);
        if !self.step_errors.is_empty() {
            debug!(
                step = self.step.number(),
                errors = self.step_errors.len(),
                "step blocked"
            );
            return StepOutcome::Blocked {
                errors: self.step_errors.len(),
            };
        }
        match self.step.next() {
            Some(step) => {
                debug!(from = self.step.number(), to = step.number(), "step advanced");
                self.step = step;
                StepOutcome::Advanced { step }
            }
            None => StepOutcome::Ready,
        }
    }

    /// Moves back without validating.
    pub fn previous(&mut self) -> Step {
        if let Some(step) = self.step.previous() {
            self.step = step;
            self.step_errors = ValidationErrors::new();
        }
        self.step
    }

    /// Runs full validation and hands the submission to the completion handler.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.on_complete.is_none() {
            return SubmitOutcome::AlreadySubmitted;
        }
        self.submit_attempted = true;
        self.submit_errors = self.validator().validate_all(&self.draft);
        if !self.submit_errors.is_empty() {
            debug!(errors = self.submit_errors.len(), "submit rejected");
            return SubmitOutcome::Rejected {
                errors: self.submit_errors.len(),
            };
        }

        let submission = CampaignSubmission::resolve(self.draft.clone(), &self.reference);
        if let Some(on_complete) = self.on_complete.take() {
            debug!(name = %submission.campaign.name, "campaign submitted");
            on_complete(submission);
        }
        SubmitOutcome::Submitted
    }

    /// Discards the draft. The completion handler is never called.
    pub fn cancel(self) {
        debug!(step = self.step.number(), "form cancelled");
    }

    fn validator(&self) -> Validator<'_> {
        Validator::new(self.today).with_reference(&self.reference)
    }
}
