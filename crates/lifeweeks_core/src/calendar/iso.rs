//! ISO-8601 week arithmetic.
//!
//! # Responsibility
//! - Map a date to its ISO week identity and a (week_index, year) pair to
//!   its Thursday anchor and Monday–Sunday range.
//!
//! # Invariants
//! - Weeks run Monday–Sunday; week 1 of a year is the week containing the
//!   year's first Thursday.
//! - Every operation is a total function over its domain; out-of-range
//!   `week_index` values are the caller's contract, not validated here.

use crate::model::date::CalendarDate;
use crate::model::week::{IsoWeekLocator, WeekDateRange};

/// ISO week identity of `date`.
///
/// The date is shifted to the Thursday of its own Monday-start week; that
/// Thursday's calendar year is the ISO year, and the week number falls
/// out of its day-of-year. The single Thursday shift is what keeps the
/// year-boundary cases (week 53 of the old year, week 1 of the next)
/// branch-free.
pub fn iso_week_locator(date: CalendarDate) -> IsoWeekLocator {
    let thursday = date.add_days(3 - i32::from(date.weekday_from_monday()));
    IsoWeekLocator {
        week_number: (thursday.day_of_year() + 6) / 7,
        iso_year: thursday.year(),
    }
}

/// Thursday of ISO week `week_index + 1` of `year`.
///
/// Jan 1 advanced 0..=6 days gives the year's first Thursday (the anchor
/// of week 1); whole weeks are added from there.
pub fn week_anchor_date(week_index: u32, year: i32) -> CalendarDate {
    let jan_first = CalendarDate::first_of_year(year);
    let to_thursday = (3 - i32::from(jan_first.weekday_from_monday())).rem_euclid(7);
    jan_first.add_days(to_thursday + week_index as i32 * 7)
}

/// Monday–Sunday span of ISO week `week_index + 1` of `year`.
pub fn week_date_range(week_index: u32, year: i32) -> WeekDateRange {
    let monday = week_anchor_date(week_index, year).add_days(-3);
    WeekDateRange {
        monday,
        sunday: monday.add_days(6),
    }
}
