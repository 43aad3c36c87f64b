//! Civil calendar date value type.
//!
//! # Responsibility
//! - Provide day-granularity date arithmetic for the week-mapping core.
//! - Keep one calendar representation everywhere: a timezone-free civil
//!   date stored as days since 1970-01-01.
//!
//! # Invariants
//! - A `CalendarDate` has no time-of-day or time-zone component.
//! - Epoch-day <-> (year, month, day) conversion is exact for the
//!   supported year range 1..=9999.
//! - String form is always `YYYY-MM-DD`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supported year range for construction and parsing.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const SECONDS_PER_DAY: u64 = 86_400;

pub type DateResult<T> = Result<T, DateError>;

/// Errors from date construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input string is not `YYYY-MM-DD`.
    InvalidFormat(String),
    /// Field values do not name a real calendar day.
    OutOfRange { year: i32, month: u8, day: u8 },
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(input) => {
                write!(f, "invalid date string `{input}`; expected YYYY-MM-DD")
            }
            Self::OutOfRange { year, month, day } => {
                write!(f, "no such calendar day: year={year} month={month} day={day}")
            }
        }
    }
}

impl Error for DateError {}

/// A civil date: no time of day, no time zone.
///
/// Internally a count of days since 1970-01-01, which makes week
/// arithmetic (the only arithmetic the core needs) a plain integer
/// subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    days: i32,
}

impl CalendarDate {
    /// Creates a date from calendar fields, validating that they name a
    /// real day within the supported year range.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> DateResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || day < 1
            || day > days_in_month(year, month)
        {
            return Err(DateError::OutOfRange { year, month, day });
        }
        Ok(Self {
            days: days_from_civil(year, month, day),
        })
    }

    /// Creates a date from a raw epoch-day count.
    ///
    /// # Contract
    /// - The count must map into the supported year range; callers only
    ///   derive it from other `CalendarDate` values or from `SystemTime`.
    pub fn from_epoch_days(days: i32) -> Self {
        Self { days }
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn epoch_days(self) -> i32 {
        self.days
    }

    /// Current date in UTC, for hosts that do not inject a clock.
    pub fn today_utc() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Self {
            days: (secs / SECONDS_PER_DAY) as i32,
        }
    }

    /// January 1 of `year`. Internal shortcut; `year` comes from an
    /// already-validated date or from grid navigation clamped to one.
    pub(crate) fn first_of_year(year: i32) -> Self {
        Self {
            days: days_from_civil(year, 1, 1),
        }
    }

    pub fn year(self) -> i32 {
        self.civil().0
    }

    pub fn month(self) -> u8 {
        self.civil().1
    }

    pub fn day(self) -> u8 {
        self.civil().2
    }

    /// Returns this date shifted by `delta` whole days.
    pub fn add_days(self, delta: i32) -> Self {
        Self {
            days: self.days + delta,
        }
    }

    /// Signed whole days from `other` to `self`.
    pub fn days_since(self, other: Self) -> i32 {
        self.days - other.days
    }

    /// Day of week with Monday = 0 .. Sunday = 6.
    pub fn weekday_from_monday(self) -> u8 {
        // 1970-01-01 was a Thursday (Monday-based index 3).
        (self.days + 3).rem_euclid(7) as u8
    }

    /// Ordinal day within the calendar year, 1..=366.
    pub fn day_of_year(self) -> u32 {
        (self.days - Self::first_of_year(self.year()).days + 1) as u32
    }

    fn civil(self) -> (i32, u8, u8) {
        civil_from_days(self.days)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (year, month, day) = self.civil();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(input: &str) -> DateResult<Self> {
        let mut parts = input.splitn(3, '-');
        let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d)) if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
                let parse_err = || DateError::InvalidFormat(input.to_string());
                (
                    y.parse::<i32>().map_err(|_| parse_err())?,
                    m.parse::<u8>().map_err(|_| parse_err())?,
                    d.parse::<u8>().map_err(|_| parse_err())?,
                )
            }
            _ => return Err(DateError::InvalidFormat(input.to_string())),
        };
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateError;

    fn try_from(value: String) -> DateResult<Self> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.to_string()
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

// Proleptic-Gregorian conversion between (year, month, day) and days since
// 1970-01-01, using 400-year eras so the leap rule falls out of integer
// division (Howard Hinnant's civil-date algorithms).
fn days_from_civil(year: i32, month: u8, day: u8) -> i32 {
    let year = year - i32::from(month <= 2);
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = (year - era * 400) as u32;
    let month = u32::from(month);
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + u32::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era as i32 - 719_468
}

fn civil_from_days(days: i32) -> (i32, u8, u8) {
    let shifted = days + 719_468;
    let era = (if shifted >= 0 { shifted } else { shifted - 146_096 }) / 146_097;
    let day_of_era = (shifted - era * 146_097) as u32;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era as i32 + era * 400 + i32::from(month <= 2);
    (year, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, DateError};

    #[test]
    fn epoch_origin_is_a_thursday() {
        let date = CalendarDate::from_ymd(1970, 1, 1).unwrap();
        assert_eq!(date.epoch_days(), 0);
        assert_eq!(date.weekday_from_monday(), 3);
    }

    #[test]
    fn civil_round_trip_across_leap_boundaries() {
        for ymd in [
            (1999, 12, 31),
            (2000, 2, 29),
            (2020, 2, 29),
            (2021, 1, 1),
            (2024, 12, 31),
            (2100, 2, 28),
        ] {
            let date = CalendarDate::from_ymd(ymd.0, ymd.1, ymd.2).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), ymd);
            assert_eq!(CalendarDate::from_epoch_days(date.epoch_days()), date);
        }
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        let date = CalendarDate::from_ymd(2024, 12, 30).unwrap();
        assert_eq!(date.add_days(2).to_string(), "2025-01-01");
        assert_eq!(date.add_days(-365).to_string(), "2023-12-31");
    }

    #[test]
    fn day_of_year_counts_leap_days() {
        let date = CalendarDate::from_ymd(2020, 12, 31).unwrap();
        assert_eq!(date.day_of_year(), 366);
        let date = CalendarDate::from_ymd(2021, 12, 31).unwrap();
        assert_eq!(date.day_of_year(), 365);
    }

    #[test]
    fn parse_and_display_round_trip() {
        let date: CalendarDate = "1987-06-05".parse().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1987, 6, 5));
        assert_eq!(date.to_string(), "1987-06-05");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["1987/06/05", "87-06-05", "1987-6-5", "not a date", ""] {
            let err = input.parse::<CalendarDate>().unwrap_err();
            assert!(matches!(err, DateError::InvalidFormat(_)), "input {input}");
        }
    }

    #[test]
    fn from_ymd_rejects_impossible_days() {
        assert!(CalendarDate::from_ymd(2021, 2, 29).is_err());
        assert!(CalendarDate::from_ymd(2021, 13, 1).is_err());
        assert!(CalendarDate::from_ymd(2021, 4, 31).is_err());
        assert!(CalendarDate::from_ymd(0, 1, 1).is_err());
    }
}
