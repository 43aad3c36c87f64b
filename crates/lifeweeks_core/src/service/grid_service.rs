//! Year grid use-case service.
//!
//! # Responsibility
//! - Derive per-slot state for a displayed year from the calendar math
//!   and the year store.
//! - Enforce grid-level navigation rules above the per-slot math.
//!
//! # Invariants
//! - A grid always holds exactly `SLOTS_PER_YEAR` slots, data or not.
//! - The displayed year is never earlier than the birth year.
//! - `date_range` and `weeks_since_birth` are cached at build time and
//!   only ever invalidated by a full rebuild (birth anchor or display
//!   year changed); `refresh` must not touch them.

use crate::calendar::birth::weeks_since_birth;
use crate::calendar::iso::{iso_week_locator, week_date_range};
use crate::model::date::CalendarDate;
use crate::model::memory::{BirthAnchor, WeekRecord};
use crate::model::week::{IsoWeekLocator, WeekSlot, SLOTS_PER_YEAR};
use crate::repo::year_repo::{StoreError, YearDataStore};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type GridResult<T> = Result<T, GridError>;

/// Errors from grid state derivation.
#[derive(Debug)]
pub enum GridError {
    Store(StoreError),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for GridError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Fully derived state for one displayed year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    /// Displayed year after birth-year clamping.
    pub year: i32,
    /// Exactly `SLOTS_PER_YEAR` slots in grid order.
    pub slots: Vec<WeekSlot>,
}

/// Use-case service deriving year grids over a year store.
pub struct YearGridService<S: YearDataStore> {
    store: S,
}

impl<S: YearDataStore> YearGridService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the full slot list for `requested_year`.
    ///
    /// # Contract
    /// - Years before the birth year are clamped to it.
    /// - A year with no persisted records yields 52 valid slots with
    ///   `has_data = false`; missing data is never an error.
    pub fn initialize_year(
        &self,
        requested_year: i32,
        birth: Option<BirthAnchor>,
        today: CalendarDate,
    ) -> GridResult<YearGrid> {
        let started_at = Instant::now();
        let year = clamp_display_year(requested_year, birth);
        let records = self.store.load_year(year)?;
        let today_locator = iso_week_locator(today);

        let slots = (0..SLOTS_PER_YEAR as u32)
            .map(|slot_index| {
                build_slot(slot_index, year, birth, today, today_locator, &records)
            })
            .collect();

        info!(
            "event=grid_init module=grid status=ok year={year} requested={requested_year} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(YearGrid { year, slots })
    }

    /// Re-derives the volatile slot flags in place.
    ///
    /// Only `has_data`, `is_past`, and `is_current_week` change between
    /// frames for a fixed (year, birth); the cached `date_range` and
    /// `weeks_since_birth` are left untouched. A birth-anchor change
    /// requires `initialize_year`, not `refresh`.
    pub fn refresh(&self, grid: &mut YearGrid, today: CalendarDate) -> GridResult<()> {
        let records = self.store.load_year(grid.year)?;
        let today_locator = iso_week_locator(today);

        for slot in &mut grid.slots {
            slot.is_past = slot.date_range.monday < today;
            slot.is_current_week = is_current_week(slot.slot_index, grid.year, today_locator);
            slot.has_data = records
                .get(slot.slot_index as usize)
                .is_some_and(WeekRecord::has_entries);
        }
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Clamps grid navigation so no year before the birth year is shown.
pub fn clamp_display_year(requested_year: i32, birth: Option<BirthAnchor>) -> i32 {
    match birth {
        Some(anchor) => requested_year.max(anchor.year()),
        None => requested_year,
    }
}

fn build_slot(
    slot_index: u32,
    year: i32,
    birth: Option<BirthAnchor>,
    today: CalendarDate,
    today_locator: IsoWeekLocator,
    records: &[WeekRecord],
) -> WeekSlot {
    let date_range = week_date_range(slot_index, year);
    let ordinal = match birth {
        Some(anchor) => weeks_since_birth(slot_index, year, anchor),
        // Display sentinel for the onboarding grid, not a week count.
        None => slot_index + 1,
    };

    WeekSlot {
        slot_index,
        date_range,
        weeks_since_birth: ordinal,
        is_before_birth: birth.is_some_and(|anchor| date_range.monday < anchor.date()),
        is_past: date_range.monday < today,
        is_current_week: is_current_week(slot_index, year, today_locator),
        has_data: records
            .get(slot_index as usize)
            .is_some_and(WeekRecord::has_entries),
    }
}

fn is_current_week(slot_index: u32, year: i32, today_locator: IsoWeekLocator) -> bool {
    slot_index == today_locator.week_number - 1 && year == today_locator.iso_year
}
