//! Wire types for `POST /api/generate-plan`.

use serde::{Deserialize, Serialize};

use crate::preferences::{GradingPreference, MaxClassesPerDay, SchedulePreference, Term};

/// Request body sent to the plan service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub student_info: StudentInfo,
    pub conditions: Conditions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub department: String,
    pub grade: String,
    pub class_number: String,
    pub term: Term,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub target_credits: u32,
    pub purpose: String,
    pub good_subjects: String,
    pub weak_subjects: String,
    /// `null` means "no constraint"; it is never omitted.
    pub schedule_preferences: Option<SchedulePreference>,
    pub max_classes_per_day: MaxClassesPerDay,
    pub grading_preference: GradingPreference,
}

/// Response body as returned by the plan service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlanResponse {
    pub patterns: Vec<Pattern>,
    #[serde(default)]
    pub reasoning: String,
}

/// One candidate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub courses: Vec<Course>,
    /// Opaque label chosen by the service, e.g. "中程度".
    #[serde(default)]
    pub expected_workload: serde_json::Value,
    /// Opaque figure chosen by the service; may be a number or a string.
    #[serde(default)]
    pub estimated_gpa: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    pub credits: u32,
    /// Weekday label. Unrecognized labels are kept here and dropped from timetables.
    pub day: String,
    pub period: u8,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: String,
}

/// Render an opaque service value for display: strings verbatim, `null` as `-`.
pub fn display_opaque(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_owned(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
