//! Session state and the submission flow.
//!
//! [`Session`] is the single authoritative UI state. It changes only through
//! [`Session::dispatch`] for user edits and [`Session::apply`] for submission
//! outcomes. [`Submitter`] owns the in-flight guard: at most one plan request
//! is outstanding, and a second attempt while one is running does nothing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::planner::{PlanApiError, PlanService};
use crate::preferences::{Field, Period, PreferenceModel, ValidationError, Weekday};
use crate::request;
use crate::timetable::{self, PlanResult, TransformError};
use crate::utils::{fmt_duration, log_if_slow};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] PlanApiError),
    /// Decoded fine but could not be laid out, e.g. a credit total overflow.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl SubmitError {
    /// Text shown to the user. Malformed responses get a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Api(PlanApiError::Status { status }) => {
                format!("Failed to generate plan: server error {status}")
            }
            Self::Api(PlanApiError::Network(e)) => format!("Failed to generate plan: {e}"),
            Self::Api(PlanApiError::Malformed { .. }) | Self::Transform(_) => {
                "Failed to generate plan: the service returned an unexpected response".to_owned()
            }
        }
    }
}

#[derive(Debug)]
pub enum Submission {
    /// Another submission was in flight; nothing happened.
    Skipped,
    Finished(Result<PlanResult, SubmitError>),
}

/// Holds the flag for the lifetime of one submission and clears it on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Submitter {
    service: Arc<dyn PlanService>,
    in_flight: AtomicBool,
    slow_threshold: Duration,
}

impl Submitter {
    pub fn new(service: Arc<dyn PlanService>) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
            slow_threshold: Duration::from_secs(10),
        }
    }

    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate, send, and transform. A no-op while another call is in flight.
    pub async fn submit(&self, model: &PreferenceModel) -> Submission {
        let Some(_guard) = InFlight::claim(&self.in_flight) else {
            debug!("submission ignored, request already in flight");
            return Submission::Skipped;
        };
        Submission::Finished(self.run(model).await)
    }

    async fn run(&self, model: &PreferenceModel) -> Result<PlanResult, SubmitError> {
        let validated = model.validate()?;
        let request = request::build(&validated);

        info!(
            target_credits = request.conditions.target_credits,
            purpose = %request.conditions.purpose,
            schedule_constrained = request.conditions.schedule_preferences.is_some(),
            "generating plan"
        );

        let start = Instant::now();
        let raw = self.service.generate_plan(&request).await;
        log_if_slow(start, self.slow_threshold, "plan generation");
        let raw = raw.inspect_err(|e| warn!(error = %e, "plan generation failed"))?;

        let result = timetable::transform(raw)?;
        info!(
            patterns = result.patterns.len(),
            duration = fmt_duration(start.elapsed()),
            "plan generated"
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Input,
    Result,
}

/// User edits, applied in order by [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetField(Field),
    TogglePeriod(Weekday, Period),
    SetNoPreference(bool),
    /// Leave the result view. The model is kept as-is.
    BackToInput,
}

#[derive(Debug, Default)]
pub struct Session {
    model: PreferenceModel,
    result: Option<PlanResult>,
    error: Option<String>,
    view: View,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: PreferenceModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn model(&self) -> &PreferenceModel {
        &self.model
    }

    pub fn result(&self) -> Option<&PlanResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetField(field) => self.model.set_field(field),
            Action::TogglePeriod(day, period) => {
                self.model.toggle_period(day, period);
            }
            Action::SetNoPreference(flag) => self.model.set_no_preference(flag),
            Action::BackToInput => {
                self.view = View::Input;
                self.error = None;
            }
        }
    }

    /// Fold a submission outcome into the session.
    ///
    /// Success replaces the previous result wholesale. Failure records the
    /// user message and returns to the input view with the model untouched.
    pub fn apply(&mut self, submission: Submission) {
        match submission {
            Submission::Skipped => {}
            Submission::Finished(Ok(result)) => {
                self.result = Some(result);
                self.error = None;
                self.view = View::Result;
            }
            Submission::Finished(Err(e)) => {
                self.error = Some(e.user_message());
                self.view = View::Input;
            }
        }
    }

    /// Run one submission against `submitter` and apply its outcome.
    pub async fn submit(&mut self, submitter: &Submitter) {
        self.error = None;
        let submission = submitter.submit(&self.model).await;
        self.apply(submission);
    }
}
