//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifeweeks_core` linkage.
//! - Keep output deterministic apart from the current-date line.

use lifeweeks_core::{iso_week_locator, CalendarDate};

fn main() {
    let today = CalendarDate::today_utc();
    let locator = iso_week_locator(today);
    println!("lifeweeks_core version={}", lifeweeks_core::core_version());
    println!(
        "today={today} iso_week={} iso_year={}",
        locator.week_number, locator.iso_year
    );
}
