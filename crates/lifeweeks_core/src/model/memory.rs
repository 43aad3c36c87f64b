//! Week entry records and the birth anchor.
//!
//! # Responsibility
//! - Define the persisted per-week record shape the store hands to the
//!   grid core.
//! - Define the birth anchor all week ordinals are measured from.
//!
//! # Invariants
//! - A year's record list always holds exactly `SLOTS_PER_YEAR` entries
//!   once it leaves the store boundary.
//! - The grid core reads only "is the memories list non-empty"; entry
//!   fields exist for the editing layer.

use crate::model::date::CalendarDate;
use crate::model::week::SLOTS_PER_YEAR;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a week entry.
pub type EntryId = Uuid;

/// Whether an entry looks backward or forward.
///
/// Past weeks carry memories, future weeks carry goals; the grid core
/// treats both identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Memory,
    Goal,
}

/// One memory or goal attached to a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Stable global ID, generated at creation.
    pub id: EntryId,
    pub kind: EntryKind,
    pub title: String,
    /// Free-form body text; may be empty for image-only entries.
    pub body: String,
    /// Optional reference to a stored image (data URL or asset key).
    pub image: Option<String>,
}

impl MemoryEntry {
    /// Creates an entry with a generated stable ID and no image.
    pub fn new(kind: EntryKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            body: body.into(),
            image: None,
        }
    }
}

/// Persisted record for one week slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekRecord {
    #[serde(default)]
    pub memories: Vec<MemoryEntry>,
}

impl WeekRecord {
    /// Whether this slot should render as "has data".
    pub fn has_entries(&self) -> bool {
        !self.memories.is_empty()
    }
}

/// A full year's worth of empty records, one per grid slot.
pub fn empty_year_records() -> Vec<WeekRecord> {
    vec![WeekRecord::default(); SLOTS_PER_YEAR]
}

/// The user's birth date; every week ordinal is measured from it.
///
/// Immutable for a session once set. Persisted by the store; a
/// "return home" action suspends it without erasing the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthAnchor {
    date: CalendarDate,
}

impl BirthAnchor {
    pub fn new(date: CalendarDate) -> Self {
        Self { date }
    }

    pub fn date(self) -> CalendarDate {
        self.date
    }

    /// Calendar year of the birth date; the earliest year the grid may
    /// display.
    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Monday of the birth date's own ISO week.
    ///
    /// This is the zero point of the weeks-since-birth ordinal; see
    /// `calendar::birth` for why the Monday (not the birth day itself)
    /// anchors the count.
    pub fn week_monday(self) -> CalendarDate {
        self.date
            .add_days(-i32::from(self.date.weekday_from_monday()))
    }
}

#[cfg(test)]
mod tests {
    use super::{empty_year_records, BirthAnchor, EntryKind, MemoryEntry, WeekRecord};
    use crate::model::date::CalendarDate;
    use crate::model::week::SLOTS_PER_YEAR;

    #[test]
    fn new_entry_has_generated_id_and_no_image() {
        let entry = MemoryEntry::new(EntryKind::Memory, "first concert", "it rained");
        assert!(!entry.id.is_nil());
        assert_eq!(entry.image, None);
    }

    #[test]
    fn empty_year_has_one_record_per_slot() {
        let records = empty_year_records();
        assert_eq!(records.len(), SLOTS_PER_YEAR);
        assert!(records.iter().all(|record| !record.has_entries()));
    }

    #[test]
    fn week_record_reports_entries() {
        let mut record = WeekRecord::default();
        assert!(!record.has_entries());
        record
            .memories
            .push(MemoryEntry::new(EntryKind::Goal, "run a marathon", ""));
        assert!(record.has_entries());
    }

    #[test]
    fn week_monday_lands_on_monday_at_or_before_birth() {
        // 1990-06-15 was a Friday; its week's Monday is 1990-06-11.
        let birth = BirthAnchor::new(CalendarDate::from_ymd(1990, 6, 15).unwrap());
        let monday = birth.week_monday();
        assert_eq!(monday.to_string(), "1990-06-11");
        assert_eq!(monday.weekday_from_monday(), 0);

        // A Monday birth anchors to itself.
        let birth = BirthAnchor::new(CalendarDate::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(birth.week_monday(), birth.date());
    }
}
