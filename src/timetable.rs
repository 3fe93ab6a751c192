//! Turns the service's flat course lists into weekly timetables.
//!
//! A [`Timetable`] is derived data: it is rebuilt from every response and
//! never edited in place. Totals are summed over the finished grid rather than
//! the raw course list, so a course dropped for an unknown weekday or a period
//! outside 1..=6 never counts toward the displayed credits.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::planner::json::parse_json_with_context;
use crate::planner::models::{Course, Pattern, RawPlanResponse};
use crate::preferences::{Period, Week, Weekday};

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("credit total of pattern '{pattern}' does not fit in 32 bits")]
    CreditOverflow { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableCell {
    pub period: u8,
    pub course: String,
    pub credits: u32,
}

/// Weekday buckets, each ordered by period.
pub type Timetable = Week<Vec<TimetableCell>>;

impl Timetable {
    /// First cell claiming `period` on `day`, if any.
    pub fn cell_at(&self, day: Weekday, period: u8) -> Option<&TimetableCell> {
        self.get(day).iter().find(|cell| cell.period == period)
    }

    pub fn cells(&self) -> impl Iterator<Item = &TimetableCell> {
        self.iter().flat_map(|(_, cells)| cells.iter())
    }

    /// `None` when the sum overflows.
    pub fn total_credits(&self) -> Option<u32> {
        self.cells()
            .try_fold(0u32, |total, cell| total.checked_add(cell.credits))
    }
}

/// A pattern plus its derived timetable and credit total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPattern {
    #[serde(flatten)]
    pub pattern: Pattern,
    pub timetable: Timetable,
    pub total_credits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub patterns: Vec<PlannedPattern>,
    pub reasoning: String,
}

pub fn build_timetable(courses: &[Course]) -> Timetable {
    let mut timetable = Timetable::default();

    for course in courses {
        let Some(day) = Weekday::from_label(&course.day) else {
            trace!(course = %course.name, day = %course.day, "dropping course with unknown weekday");
            continue;
        };
        if Period::new(course.period).is_err() {
            trace!(course = %course.name, period = course.period, "dropping course with out-of-range period");
            continue;
        }
        timetable.get_mut(day).push(TimetableCell {
            period: course.period,
            course: course.name.clone(),
            credits: course.credits,
        });
    }

    // Stable: two courses in the same slot keep their response order.
    for cells in timetable.values_mut() {
        cells.sort_by_key(|cell| cell.period);
    }

    timetable
}

pub fn plan_pattern(pattern: Pattern) -> Result<PlannedPattern, TransformError> {
    let timetable = build_timetable(&pattern.courses);
    let Some(total_credits) = timetable.total_credits() else {
        warn!(pattern = %pattern.name, "credit total overflowed");
        return Err(TransformError::CreditOverflow {
            pattern: pattern.name,
        });
    };
    Ok(PlannedPattern {
        pattern,
        timetable,
        total_credits,
    })
}

/// All patterns or none: one bad pattern fails the whole response.
pub fn transform(raw: RawPlanResponse) -> Result<PlanResult, TransformError> {
    let patterns = raw
        .patterns
        .into_iter()
        .map(plan_pattern)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(patterns = patterns.len(), "plan response transformed");
    Ok(PlanResult {
        patterns,
        reasoning: raw.reasoning,
    })
}

/// Decode a raw response body and transform it. Used for saved responses.
pub fn transform_body(body: &str) -> anyhow::Result<PlanResult> {
    let raw: RawPlanResponse = parse_json_with_context(body)?;
    Ok(transform(raw)?)
}
