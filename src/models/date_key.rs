//! Date keys and calendar months.
//!
//! Every entry is addressed by a canonical `YYYY-MM-DD` key. Months are
//! always 1-indexed (`2024-03` is March), both when parsing keys and when
//! filtering for a month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, CalendarResult};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parses a canonical `YYYY-MM-DD` date key.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::parse_date_key;
/// use chrono::NaiveDate;
///
/// let date = parse_date_key("2024-03-01").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert!(parse_date_key("2024-3-1").is_err());
/// assert!(parse_date_key("2024-02-30").is_err());
/// ```
pub fn parse_date_key(key: &str) -> CalendarResult<NaiveDate> {
    let invalid = || CalendarError::InvalidDateKey {
        key: key.to_string(),
    };
    if key.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).map_err(|_| invalid())
}

/// Formats a date as its canonical key.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// A calendar month, displayed and keyed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1..=12.
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(CalendarError::InvalidMonth { year, month })
        }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-indexed month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDateKey { key: s.to_string() };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
