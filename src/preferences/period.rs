//! Class periods and the ordered period set kept per weekday.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-length class slot within a day, `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 6;

    pub fn new(value: u8) -> Result<Self, PeriodError> {
        if (Self::FIRST..=Self::LAST).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PeriodError(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every period of the day, in order.
    pub fn all() -> impl Iterator<Item = Period> {
        (Self::FIRST..=Self::LAST).map(Period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u8> for Period {
    type Error = PeriodError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("period {0} is out of range (expected 1-6)")]
pub struct PeriodError(pub u8);

/// Ascending, duplicate-free set of periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeriodSet(Vec<Period>);

impl PeriodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, period: Period) -> bool {
        self.0.binary_search(&period).is_ok()
    }

    /// Remove `period` if present, otherwise insert it in order.
    /// Returns whether the period is selected afterwards.
    pub fn toggle(&mut self, period: Period) -> bool {
        match self.0.binary_search(&period) {
            Ok(idx) => {
                self.0.remove(idx);
                false
            }
            Err(idx) => {
                self.0.insert(idx, period);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Period> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Period] {
        &self.0
    }
}

/// Incoming lists may be unsorted or repeat a period; both collapse here.
impl<'de> Deserialize<'de> for PeriodSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut periods = Vec::<Period>::deserialize(deserializer)?;
        periods.sort_unstable();
        periods.dedup();
        Ok(Self(periods))
    }
}
