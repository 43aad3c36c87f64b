//! Week identity and grid-slot domain records.
//!
//! # Responsibility
//! - Define the ISO week identity of a date and the Monday–Sunday range
//!   of a grid slot.
//! - Define the per-slot state the rendering layer consumes.
//!
//! # Invariants
//! - `week_number` is 1-based (1..=53); `slot_index` is 0-based (0..=51).
//! - `iso_year` may differ from the Gregorian year of dates near
//!   January/December boundaries.

use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};

/// Fixed slot count of a displayed year grid.
///
/// The honeycomb layout always renders 52 circles per year; a 53rd ISO
/// week has no slot of its own in the displayed year.
pub const SLOTS_PER_YEAR: usize = 52;

/// ISO-8601 week identity of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoWeekLocator {
    /// 1-based ISO week number, 1..=53.
    pub week_number: u32,
    /// ISO year owning the week; not always the date's calendar year.
    pub iso_year: i32,
}

/// Monday–Sunday span of one ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDateRange {
    pub monday: CalendarDate,
    pub sunday: CalendarDate,
}

/// Grid coordinate recovered from a weeks-since-birth ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCoordinate {
    /// Display (ISO) year owning the week.
    pub year: i32,
    /// 0-based slot index within that year's grid.
    pub week_index: u32,
}

/// Derived state for one circle of a displayed year.
///
/// `date_range` and `weeks_since_birth` are computed once per
/// (slot_index, year, birth) and cached on the slot; the only
/// invalidation rule is a full grid rebuild when the birth anchor or
/// display year changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSlot {
    /// 0-based position within the grid, 0..=51.
    pub slot_index: u32,
    pub date_range: WeekDateRange,
    /// Ordinal week count from the birth anchor, saturated at 0.
    /// When no birth anchor is set this holds the `slot_index + 1`
    /// display sentinel, not a real week count.
    pub weeks_since_birth: u32,
    /// Monday of this slot precedes the birth date's own day.
    pub is_before_birth: bool,
    /// Monday of this slot precedes "today".
    pub is_past: bool,
    /// This slot is today's ISO week in today's ISO year.
    pub is_current_week: bool,
    /// At least one entry is stored for this slot.
    pub has_data: bool,
}
