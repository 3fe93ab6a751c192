//! The student's planning input and the operations that mutate it.
//!
//! All state lives in [`PreferenceModel`]. Scalar fields change through
//! [`PreferenceModel::set_field`], period availability through
//! [`PreferenceModel::toggle_period`] and
//! [`PreferenceModel::set_no_preference`]. Nothing is range-checked until
//! [`PreferenceModel::validate`] runs at submission time.

pub mod file;
pub mod options;
pub mod period;
pub mod week;

pub use options::{GradingPreference, MaxClassesPerDay, Purpose, Term};
pub use period::{Period, PeriodError, PeriodSet};
pub use week::{Week, Weekday, WeekdayError};

use tracing::trace;

/// Desired periods for each weekday. An empty day means "unavailable".
pub type SchedulePreference = Week<PeriodSet>;

/// A replacement value for one scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Department(String),
    Grade(String),
    ClassNumber(String),
    Term(Term),
    Purpose(Purpose),
    PurposeOther(String),
    /// `None` when the input box is blank or unparseable.
    TargetCredits(Option<i64>),
    GoodSubjects(String),
    WeakSubjects(String),
    MaxClassesPerDay(MaxClassesPerDay),
    GradingPreference(GradingPreference),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown preference field '{0}'")]
    UnknownField(String),
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

impl Field {
    /// Field names accepted by [`Field::parse`].
    pub const NAMES: [&'static str; 11] = [
        "department",
        "grade",
        "class_number",
        "term",
        "purpose",
        "purpose_other",
        "target_credits",
        "good_subjects",
        "weak_subjects",
        "max_classes_per_day",
        "grading_preference",
    ];

    /// Parse a `name`/`value` pair as typed in by the user.
    pub fn parse(name: &str, value: &str) -> Result<Self, FieldError> {
        fn choice<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, FieldError> {
            value.parse().map_err(|_| FieldError::InvalidValue {
                field,
                value: value.to_owned(),
            })
        }

        let field = match name.trim() {
            "department" => Self::Department(value.to_owned()),
            "grade" => Self::Grade(value.to_owned()),
            "class_number" => Self::ClassNumber(value.to_owned()),
            "term" => Self::Term(choice("term", value)?),
            "purpose" => Self::Purpose(choice("purpose", value)?),
            "purpose_other" => Self::PurposeOther(value.to_owned()),
            "target_credits" => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Self::TargetCredits(None)
                } else {
                    Self::TargetCredits(Some(choice("target_credits", trimmed)?))
                }
            }
            "good_subjects" => Self::GoodSubjects(value.to_owned()),
            "weak_subjects" => Self::WeakSubjects(value.to_owned()),
            "max_classes_per_day" => Self::MaxClassesPerDay(choice("max_classes_per_day", value)?),
            "grading_preference" => {
                Self::GradingPreference(choice("grading_preference", value)?)
            }
            other => return Err(FieldError::UnknownField(other.to_owned())),
        };
        Ok(field)
    }
}

/// Raised by [`PreferenceModel::validate`]; blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("target credits must be entered and be at least 1")]
    MissingTargetCredits,
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingTargetCredits => "missing_target_credits",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceModel {
    pub(crate) department: String,
    pub(crate) grade: String,
    pub(crate) class_number: String,
    pub(crate) term: Term,
    pub(crate) purpose: Purpose,
    pub(crate) purpose_other: String,
    pub(crate) target_credits: Option<i64>,
    pub(crate) good_subjects: String,
    pub(crate) weak_subjects: String,
    pub(crate) max_classes_per_day: MaxClassesPerDay,
    pub(crate) grading_preference: GradingPreference,
    schedule: SchedulePreference,
    no_preference: bool,
}

impl Default for PreferenceModel {
    fn default() -> Self {
        Self {
            department: "information_science".to_owned(),
            grade: "1".to_owned(),
            class_number: "A".to_owned(),
            term: Term::default(),
            purpose: Purpose::default(),
            purpose_other: String::new(),
            target_credits: Some(20),
            good_subjects: String::new(),
            weak_subjects: String::new(),
            max_classes_per_day: MaxClassesPerDay::default(),
            grading_preference: GradingPreference::default(),
            schedule: SchedulePreference::default(),
            no_preference: false,
        }
    }
}

impl PreferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: Field) {
        trace!(field = ?field, "preference field set");
        match field {
            Field::Department(v) => self.department = v,
            Field::Grade(v) => self.grade = v,
            Field::ClassNumber(v) => self.class_number = v,
            Field::Term(v) => self.term = v,
            Field::Purpose(v) => self.purpose = v,
            Field::PurposeOther(v) => self.purpose_other = v,
            Field::TargetCredits(v) => self.target_credits = v,
            Field::GoodSubjects(v) => self.good_subjects = v,
            Field::WeakSubjects(v) => self.weak_subjects = v,
            Field::MaxClassesPerDay(v) => self.max_classes_per_day = v,
            Field::GradingPreference(v) => self.grading_preference = v,
        }
    }

    /// Flip one period on `day`. Returns whether it is selected afterwards.
    pub fn toggle_period(&mut self, day: Weekday, period: Period) -> bool {
        let selected = self.schedule.get_mut(day).toggle(period);
        trace!(day = %day, period = %period, selected, "period toggled");
        selected
    }

    /// Setting the flag wipes every day's selection; clearing it restores nothing.
    pub fn set_no_preference(&mut self, flag: bool) {
        if flag {
            for periods in self.schedule.values_mut() {
                periods.clear();
            }
        }
        self.no_preference = flag;
    }

    pub fn validate(&self) -> Result<Validated<'_>, ValidationError> {
        match self.target_credits {
            Some(credits) if credits >= 1 => Ok(Validated {
                model: self,
                target_credits: u32::try_from(credits)
                    .map_err(|_| ValidationError::MissingTargetCredits)?,
            }),
            _ => Err(ValidationError::MissingTargetCredits),
        }
    }

    pub fn schedule(&self) -> &SchedulePreference {
        &self.schedule
    }

    pub fn no_preference(&self) -> bool {
        self.no_preference
    }

    pub fn target_credits(&self) -> Option<i64> {
        self.target_credits
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }
}

/// A model that passed [`PreferenceModel::validate`].
#[derive(Debug, Clone, Copy)]
pub struct Validated<'a> {
    pub(crate) model: &'a PreferenceModel,
    pub(crate) target_credits: u32,
}

impl Validated<'_> {
    pub fn target_credits(&self) -> u32 {
        self.target_credits
    }
}
