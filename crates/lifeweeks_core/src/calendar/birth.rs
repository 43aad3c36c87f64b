//! Mapping between grid weeks and the weeks-since-birth ordinal.
//!
//! # Responsibility
//! - Count whole weeks from the birth anchor to any grid week.
//! - Recover the (year, week_index) grid coordinate from an ordinal.
//!
//! # Invariants
//! - Both directions anchor the birth side to the Monday of the birth
//!   date's ISO week. Anchoring to the birth day itself would shift the
//!   count by one for Friday–Sunday births and break the round trip
//!   `weeks_since_birth(week_from_ordinal(n)) == n`.
//! - Weeks before birth saturate to 0; they are never negative.

use crate::calendar::iso::{iso_week_locator, week_anchor_date};
use crate::model::memory::BirthAnchor;
use crate::model::week::WeekCoordinate;

/// Whole weeks from the birth anchor to ISO week `week_index + 1` of
/// `year`, saturating at 0 for weeks at or before birth.
pub fn weeks_since_birth(week_index: u32, year: i32, birth: BirthAnchor) -> u32 {
    let anchor = week_anchor_date(week_index, year);
    let days = anchor.days_since(birth.week_monday());
    days.div_euclid(7).max(0) as u32
}

/// Grid coordinate of the week `ordinal` whole weeks after birth.
///
/// Returns `None` when no birth anchor is set or the ordinal is
/// negative; callers must refuse the action rather than guess a week.
pub fn week_from_ordinal(ordinal: i64, birth: Option<BirthAnchor>) -> Option<WeekCoordinate> {
    let birth = birth?;
    if ordinal < 0 {
        return None;
    }
    let target = birth.week_monday().add_days(ordinal as i32 * 7);
    let locator = iso_week_locator(target);
    Some(WeekCoordinate {
        year: locator.iso_year,
        week_index: locator.week_number - 1,
    })
}
