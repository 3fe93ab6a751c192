//! Choice-valued preference fields and their wire representations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Teaching term. The service expects the Japanese term names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    #[default]
    #[serde(rename = "前期", alias = "spring")]
    Spring,
    #[serde(rename = "後期", alias = "fall")]
    Fall,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "前期",
            Self::Fall => "後期",
        }
    }
}

impl FromStr for Term {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "前期" => Ok(Self::Spring),
            "後期" => Ok(Self::Fall),
            other => match other.to_ascii_lowercase().as_str() {
                "spring" | "first" => Ok(Self::Spring),
                "fall" | "autumn" | "second" => Ok(Self::Fall),
                _ => Err(()),
            },
        }
    }
}

/// What the student is optimizing their plan for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Credits,
    GoodSubjects,
    #[default]
    Balance,
    Gpa,
    /// Use the free-text `purpose_other` instead of a tag.
    Other,
}

impl Purpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::GoodSubjects => "good_subjects",
            Self::Balance => "balance",
            Self::Gpa => "gpa",
            Self::Other => "other",
        }
    }
}

impl FromStr for Purpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credits" => Ok(Self::Credits),
            "good_subjects" => Ok(Self::GoodSubjects),
            "balance" => Ok(Self::Balance),
            "gpa" => Ok(Self::Gpa),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

/// How the student prefers to be graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingPreference {
    Test,
    Report,
    #[default]
    Any,
}

impl FromStr for GradingPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "report" => Ok(Self::Report),
            "any" => Ok(Self::Any),
            _ => Err(()),
        }
    }
}

/// Upper bound on classes in a single day.
///
/// On the wire this is the string `"none"` or a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMaxClasses")]
pub enum MaxClassesPerDay {
    #[default]
    NoLimit,
    Limit(u8),
}

impl MaxClassesPerDay {
    pub const MAX: u8 = 6;

    pub fn limit(n: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&n).then_some(Self::Limit(n))
    }
}

impl fmt::Display for MaxClassesPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLimit => f.write_str("none"),
            Self::Limit(n) => n.fmt(f),
        }
    }
}

impl Serialize for MaxClassesPerDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoLimit => serializer.serialize_str("none"),
            Self::Limit(n) => serializer.serialize_u8(*n),
        }
    }
}

impl FromStr for MaxClassesPerDay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::NoLimit);
        }
        s.parse::<u8>().ok().and_then(Self::limit).ok_or(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMaxClasses {
    Number(u8),
    Text(String),
}

impl TryFrom<RawMaxClasses> for MaxClassesPerDay {
    type Error = String;

    fn try_from(raw: RawMaxClasses) -> Result<Self, Self::Error> {
        match raw {
            RawMaxClasses::Number(n) => {
                Self::limit(n).ok_or_else(|| format!("max classes per day must be 1-6, got {n}"))
            }
            RawMaxClasses::Text(s) => s
                .parse()
                .map_err(|_| format!("invalid max classes per day '{s}'")),
        }
    }
}
