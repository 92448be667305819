use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::MizanError;

/// A calendar month. Orders chronologically (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, MizanError> {
        if !(1..=12).contains(&month) {
            return Err(MizanError::invalid_input("month", month, "month must be between 1 and 12"));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// The following month, or `None` past the last representable year.
    pub fn checked_succ(self) -> Option<Self> {
        if self.month >= 12 {
            Some(Self { year: self.year.checked_add(1)?, month: 1 })
        } else {
            Some(Self { year: self.year, month: self.month + 1 })
        }
    }

    /// The following month. Saturates at the last representable month.
    pub fn succ(self) -> Self {
        self.checked_succ().unwrap_or(self)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Short chart label, e.g. `Jan 2024`.
    pub fn label(self) -> String {
        match self.first_day() {
            Some(date) => date.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }

    /// Every month from `self` to `end`, both inclusive. Empty when `end` is earlier.
    pub fn through(self, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(self), |m| m.checked_succ()).take_while(move |m| *m <= end)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Parses the `YYYY-MM` form used by month pickers.
impl FromStr for YearMonth {
    type Err = MizanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| MizanError::invalid_input("period", s, "expected YYYY-MM"))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| MizanError::invalid_input("period", s, e.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| MizanError::invalid_input("period", s, e.to_string()))?;
        YearMonth::new(year, month)
    }
}
