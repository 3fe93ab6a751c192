//! Maps validated preferences onto the plan service request.

use crate::planner::models::{Conditions, PlanRequest, StudentInfo};
use crate::preferences::{Purpose, Validated};

/// Snapshot the model as a [`PlanRequest`].
///
/// The `other` purpose is replaced by the free-text override, and the
/// no-preference flag sends `null` instead of the per-day schedule.
pub fn build(validated: &Validated<'_>) -> PlanRequest {
    let model = validated.model;

    let purpose = match model.purpose {
        Purpose::Other => model.purpose_other.clone(),
        tag => tag.as_str().to_owned(),
    };

    let schedule_preferences = if model.no_preference() {
        None
    } else {
        Some(model.schedule().clone())
    };

    PlanRequest {
        student_info: StudentInfo {
            department: model.department.clone(),
            grade: model.grade.clone(),
            class_number: model.class_number.clone(),
            term: model.term,
        },
        conditions: Conditions {
            target_credits: validated.target_credits,
            purpose,
            good_subjects: model.good_subjects.clone(),
            weak_subjects: model.weak_subjects.clone(),
            schedule_preferences,
            max_classes_per_day: model.max_classes_per_day,
            grading_preference: model.grading_preference,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{Field, Period, PreferenceModel, Weekday};
    use serde_json::json;

    fn p(n: u8) -> Period {
        Period::new(n).unwrap()
    }

    fn build_json(model: &PreferenceModel) -> serde_json::Value {
        serde_json::to_value(build(&model.validate().unwrap())).unwrap()
    }

    #[test]
    fn default_model_wire_shape() {
        let body = build_json(&PreferenceModel::new());
        assert_eq!(
            body,
            json!({
                "student_info": {
                    "department": "information_science",
                    "grade": "1",
                    "class_number": "A",
                    "term": "前期"
                },
                "conditions": {
                    "target_credits": 20,
                    "purpose": "balance",
                    "good_subjects": "",
                    "weak_subjects": "",
                    "schedule_preferences": {
                        "月": [], "火": [], "水": [], "木": [], "金": []
                    },
                    "max_classes_per_day": "none",
                    "grading_preference": "any"
                }
            })
        );
    }

    #[test]
    fn no_preference_sends_null_regardless_of_prior_periods() {
        let mut model = PreferenceModel::new();
        model.toggle_period(Weekday::Mon, p(1));
        model.toggle_period(Weekday::Thu, p(4));
        model.set_no_preference(true);

        let body = build_json(&model);
        assert!(body["conditions"]["schedule_preferences"].is_null());
        assert!(
            body["conditions"]
                .as_object()
                .unwrap()
                .contains_key("schedule_preferences")
        );
    }

    #[test]
    fn explicit_schedule_keeps_empty_days() {
        let mut model = PreferenceModel::new();
        model.toggle_period(Weekday::Wed, p(3));
        model.toggle_period(Weekday::Wed, p(1));

        let body = build_json(&model);
        let schedule = &body["conditions"]["schedule_preferences"];
        assert_eq!(schedule["水"], json!([1, 3]));
        assert_eq!(schedule["月"], json!([]));
        assert_eq!(schedule.as_object().unwrap().len(), 5);
    }

    #[test]
    fn other_purpose_uses_free_text() {
        let mut model = PreferenceModel::new();
        model.set_field(Field::Purpose(Purpose::Other));
        model.set_field(Field::PurposeOther("X".into()));
        assert_eq!(build_json(&model)["conditions"]["purpose"], "X");
    }

    #[test]
    fn tagged_purpose_ignores_free_text() {
        let mut model = PreferenceModel::new();
        model.set_field(Field::Purpose(Purpose::Gpa));
        model.set_field(Field::PurposeOther("ignored".into()));
        assert_eq!(build_json(&model)["conditions"]["purpose"], "gpa");
    }

    #[test]
    fn build_is_deterministic() {
        let mut model = PreferenceModel::new();
        model.toggle_period(Weekday::Fri, p(5));
        let validated = model.validate().unwrap();
        assert_eq!(build(&validated), build(&validated));
    }
}
