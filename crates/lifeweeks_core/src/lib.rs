//! Core domain logic for the life-in-weeks grid.
//! This crate is the single source of truth for week-mapping invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::birth::{week_from_ordinal, weeks_since_birth};
pub use calendar::iso::{iso_week_locator, week_anchor_date, week_date_range};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{CalendarDate, DateError, DateResult};
pub use model::memory::{BirthAnchor, EntryId, EntryKind, MemoryEntry, WeekRecord};
pub use model::week::{IsoWeekLocator, WeekCoordinate, WeekDateRange, WeekSlot, SLOTS_PER_YEAR};
pub use repo::kv::{KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use repo::year_repo::{KvYearStore, StoreError, StoreResult, YearDataStore, CURRENT_SCHEMA};
pub use service::grid_service::{
    clamp_display_year, GridError, GridResult, YearGrid, YearGridService,
};
pub use service::session::LifeSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
