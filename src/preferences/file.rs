//! TOML preference files.
//!
//! ```toml
//! grade = "2"
//! term = "後期"
//! purpose = "other"
//! purpose_other = "prepare for graduate school"
//! target_credits = 22
//! max_classes_per_day = 4
//!
//! [schedule]
//! mon = [1, 2]
//! "水" = [3, 4]
//! ```

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Format, Toml};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{
    Field, GradingPreference, MaxClassesPerDay, Period, PreferenceModel, Purpose, Term, Weekday,
};

/// Every key is optional; missing keys keep the model's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferenceFile {
    pub department: Option<String>,
    pub grade: Option<String>,
    pub class_number: Option<String>,
    pub term: Option<Term>,
    pub purpose: Option<Purpose>,
    pub purpose_other: Option<String>,
    pub target_credits: Option<i64>,
    pub good_subjects: Option<String>,
    pub weak_subjects: Option<String>,
    pub max_classes_per_day: Option<MaxClassesPerDay>,
    pub grading_preference: Option<GradingPreference>,
    #[serde(default)]
    pub no_preference: bool,
    /// Weekday name → periods. Days may be omitted.
    #[serde(default)]
    pub schedule: BTreeMap<String, Vec<u8>>,
}

impl PreferenceFile {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Figment::new()
            .merge(Toml::string(source))
            .extract()
            .context("Failed to parse preference file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preference file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid preference file {}", path.display()))
    }

    /// Apply onto `model` through its public operations. On error the model
    /// is left untouched.
    pub fn apply(self, model: &mut PreferenceModel) -> Result<()> {
        let mut slots = Vec::new();
        for (day, periods) in &self.schedule {
            let day: Weekday = day.parse()?;
            for &n in periods {
                let period = Period::new(n).with_context(|| format!("schedule.{day}"))?;
                slots.push((day, period));
            }
        }

        let fields = [
            self.department.map(Field::Department),
            self.grade.map(Field::Grade),
            self.class_number.map(Field::ClassNumber),
            self.term.map(Field::Term),
            self.purpose.map(Field::Purpose),
            self.purpose_other.map(Field::PurposeOther),
            self.target_credits.map(|n| Field::TargetCredits(Some(n))),
            self.good_subjects.map(Field::GoodSubjects),
            self.weak_subjects.map(Field::WeakSubjects),
            self.max_classes_per_day.map(Field::MaxClassesPerDay),
            self.grading_preference.map(Field::GradingPreference),
        ];
        for field in fields.into_iter().flatten() {
            model.set_field(field);
        }

        for (day, period) in slots {
            if !model.schedule().get(day).contains(period) {
                model.toggle_period(day, period);
            }
        }

        if self.no_preference {
            model.set_no_preference(true);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_scalars_and_schedule() {
        let file = PreferenceFile::from_toml_str(
            r#"
            grade = "2"
            term = "後期"
            purpose = "other"
            purpose_other = "graduate school"
            target_credits = 22
            max_classes_per_day = 4

            [schedule]
            mon = [2, 1, 2]
            "水" = [3]
            "#,
        )
        .unwrap();

        let mut model = PreferenceModel::new();
        file.apply(&mut model).unwrap();

        assert_eq!(model.grade, "2");
        assert_eq!(model.term, Term::Fall);
        assert_eq!(model.purpose_other, "graduate school");
        assert_eq!(model.target_credits(), Some(22));
        assert_eq!(model.max_classes_per_day, MaxClassesPerDay::Limit(4));
        let mon: Vec<u8> = model.schedule().mon.iter().map(Period::get).collect();
        assert_eq!(mon, vec![1, 2]);
        assert_eq!(model.schedule().wed.len(), 1);
        assert!(model.schedule().fri.is_empty());
    }

    #[test]
    fn no_preference_wins_over_listed_periods() {
        let file = PreferenceFile::from_toml_str(
            r#"
            no_preference = true
            [schedule]
            tue = [1, 2, 3]
            "#,
        )
        .unwrap();

        let mut model = PreferenceModel::new();
        file.apply(&mut model).unwrap();
        assert!(model.no_preference());
        assert!(model.schedule().tue.is_empty());
    }

    #[test]
    fn rejects_bad_days_and_periods() {
        let mut model = PreferenceModel::new();
        let bad_day = PreferenceFile::from_toml_str("[schedule]\nsat = [1]").unwrap();
        assert!(bad_day.apply(&mut model).is_err());

        let bad_period = PreferenceFile::from_toml_str("[schedule]\nmon = [9]").unwrap();
        assert!(bad_period.apply(&mut model).is_err());
    }

    #[test]
    fn failed_apply_leaves_model_unchanged() {
        let file = PreferenceFile::from_toml_str(
            r#"
            grade = "4"
            [schedule]
            fri = [2]
            mon = [1, 7]
            "#,
        )
        .unwrap();

        let mut model = PreferenceModel::new();
        let before = model.clone();
        assert!(file.apply(&mut model).is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(PreferenceFile::from_toml_str("favourite_colour = \"blue\"").is_err());
    }
}
