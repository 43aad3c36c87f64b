//! Domain model for the life-in-weeks core.
//!
//! # Responsibility
//! - Define the canonical date, week, and entry records shared by the
//!   calendar math, the store, and the grid service.
//!
//! # Invariants
//! - All dates are civil (timezone-free) `CalendarDate` values; no other
//!   date representation exists in the crate.
//! - Week identity follows ISO-8601 (Monday-start weeks, Thursday rule).

pub mod date;
pub mod memory;
pub mod week;
