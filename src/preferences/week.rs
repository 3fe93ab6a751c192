//! Weekdays and the fixed five-day record used for schedules and timetables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A teaching day. Declaration order is display order (left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "月")]
    Mon,
    #[serde(rename = "火")]
    Tue,
    #[serde(rename = "水")]
    Wed,
    #[serde(rename = "木")]
    Thu,
    #[serde(rename = "金")]
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// The label the plan service uses for this day.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mon => "月",
            Self::Tue => "火",
            Self::Wed => "水",
            Self::Thu => "木",
            Self::Fri => "金",
        }
    }

    /// Strict lookup by service label. Anything else is not a teaching day.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.label() == label)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday '{0}' (expected mon..fri or 月..金)")]
pub struct WeekdayError(pub String);

/// Lenient parse for user input: accepts service labels and English names.
impl FromStr for Weekday {
    type Err = WeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(day) = Self::from_label(trimmed.trim_end_matches('曜')) {
            return Ok(day);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Mon),
            "tue" | "tues" | "tuesday" => Ok(Self::Tue),
            "wed" | "wednesday" => Ok(Self::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Self::Thu),
            "fri" | "friday" => Ok(Self::Fri),
            _ => Err(WeekdayError(s.to_owned())),
        }
    }
}

/// One value per weekday, always all five.
///
/// Serializes as a map keyed by service labels in weekday order, which is the
/// shape the plan service expects for both schedule preferences and
/// timetables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week<T> {
    #[serde(rename = "月", alias = "mon")]
    pub mon: T,
    #[serde(rename = "火", alias = "tue")]
    pub tue: T,
    #[serde(rename = "水", alias = "wed")]
    pub wed: T,
    #[serde(rename = "木", alias = "thu")]
    pub thu: T,
    #[serde(rename = "金", alias = "fri")]
    pub fri: T,
}

impl<T> Week<T> {
    pub fn from_fn(mut f: impl FnMut(Weekday) -> T) -> Self {
        Self {
            mon: f(Weekday::Mon),
            tue: f(Weekday::Tue),
            wed: f(Weekday::Wed),
            thu: f(Weekday::Thu),
            fri: f(Weekday::Fri),
        }
    }

    pub fn get(&self, day: Weekday) -> &T {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
        }
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut T {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
        }
    }

    /// Days in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        [
            (Weekday::Mon, &self.mon),
            (Weekday::Tue, &self.tue),
            (Weekday::Wed, &self.wed),
            (Weekday::Thu, &self.thu),
            (Weekday::Fri, &self.fri),
        ]
        .into_iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [
            &mut self.mon,
            &mut self.tue,
            &mut self.wed,
            &mut self.thu,
            &mut self.fri,
        ]
        .into_iter()
    }
}
