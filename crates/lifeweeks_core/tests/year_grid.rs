use lifeweeks_core::db::open_db_in_memory;
use lifeweeks_core::{
    BirthAnchor, CalendarDate, EntryKind, KvYearStore, MemoryEntry, SqliteKeyValueStore,
    WeekRecord, YearDataStore, YearGridService, SLOTS_PER_YEAR,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> YearGridService<KvYearStore<SqliteKeyValueStore<'_>>> {
    YearGridService::new(KvYearStore::new(SqliteKeyValueStore::new(conn)))
}

fn date(text: &str) -> CalendarDate {
    text.parse().unwrap()
}

fn birth(text: &str) -> BirthAnchor {
    BirthAnchor::new(date(text))
}

fn records_with_entry_at(slot_index: usize) -> Vec<WeekRecord> {
    let mut records = vec![WeekRecord::default(); SLOTS_PER_YEAR];
    records[slot_index]
        .memories
        .push(MemoryEntry::new(EntryKind::Memory, "moved out", "first flat"));
    records
}

#[test]
fn empty_year_still_yields_full_grid() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let grid = service
        .initialize_year(2023, Some(birth("1990-06-15")), date("2024-06-12"))
        .unwrap();

    assert_eq!(grid.year, 2023);
    assert_eq!(grid.slots.len(), SLOTS_PER_YEAR);
    assert!(grid.slots.iter().all(|slot| !slot.has_data));
    for (index, slot) in grid.slots.iter().enumerate() {
        assert_eq!(slot.slot_index as usize, index);
        assert_eq!(slot.date_range.sunday.days_since(slot.date_range.monday), 6);
    }
}

#[test]
fn missing_birth_uses_display_sentinel() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let grid = service
        .initialize_year(2024, None, date("2024-06-12"))
        .unwrap();

    for slot in &grid.slots {
        assert_eq!(slot.weeks_since_birth, slot.slot_index + 1);
        assert!(!slot.is_before_birth);
    }
}

#[test]
fn slots_before_birth_are_flagged_and_saturated() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    // 1990-06-15 was a Friday in ISO week 24 (slot 23) of 1990.
    let grid = service
        .initialize_year(1990, Some(birth("1990-06-15")), date("2024-06-12"))
        .unwrap();

    for slot in &grid.slots {
        if slot.slot_index <= 23 {
            assert!(slot.is_before_birth, "slot {}", slot.slot_index);
            assert_eq!(slot.weeks_since_birth, 0, "slot {}", slot.slot_index);
        } else {
            assert!(!slot.is_before_birth, "slot {}", slot.slot_index);
            assert_eq!(
                slot.weeks_since_birth,
                slot.slot_index - 23,
                "slot {}",
                slot.slot_index
            );
        }
    }
}

#[test]
fn current_week_is_marked_only_in_todays_iso_year() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = date("2024-06-12");
    let anchor = birth("1990-06-15");

    // 2024-06-12 sits in ISO week 24 of 2024.
    let grid = service.initialize_year(2024, Some(anchor), today).unwrap();
    let current: Vec<u32> = grid
        .slots
        .iter()
        .filter(|slot| slot.is_current_week)
        .map(|slot| slot.slot_index)
        .collect();
    assert_eq!(current, vec![23]);

    let other_year = service.initialize_year(2023, Some(anchor), today).unwrap();
    assert!(other_year.slots.iter().all(|slot| !slot.is_current_week));
}

#[test]
fn past_flag_follows_slot_monday() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = date("2024-06-12");

    let grid = service
        .initialize_year(2024, Some(birth("1990-06-15")), today)
        .unwrap();

    for slot in &grid.slots {
        assert_eq!(slot.is_past, slot.date_range.monday < today, "slot {}", slot.slot_index);
    }
    // The current week's Monday (Jun 10) already passed, so it counts as past.
    assert!(grid.slots[23].is_past);
    assert!(!grid.slots[24].is_past);
}

#[test]
fn stored_entries_surface_as_has_data() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .store()
        .save_year(2024, &records_with_entry_at(10))
        .unwrap();

    let grid = service
        .initialize_year(2024, Some(birth("1990-06-15")), date("2024-06-12"))
        .unwrap();

    for slot in &grid.slots {
        assert_eq!(slot.has_data, slot.slot_index == 10);
    }
}

#[test]
fn navigation_clamps_to_birth_year() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let anchor = birth("1990-06-15");

    let grid = service
        .initialize_year(1985, Some(anchor), date("2024-06-12"))
        .unwrap();
    assert_eq!(grid.year, 1990);

    // Without an anchor there is nothing to clamp against.
    let grid = service.initialize_year(1985, None, date("2024-06-12")).unwrap();
    assert_eq!(grid.year, 1985);
}

#[test]
fn refresh_is_idempotent_for_unchanged_inputs() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let anchor = birth("1990-06-15");
    let today = date("2024-06-12");

    let mut grid = service.initialize_year(2024, Some(anchor), today).unwrap();
    service.refresh(&mut grid, today).unwrap();
    let first = grid.clone();
    service.refresh(&mut grid, today).unwrap();
    assert_eq!(grid, first);
}

#[test]
fn refresh_updates_data_flags_without_touching_cached_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let anchor = birth("1990-06-15");
    let today = date("2024-06-12");

    let mut grid = service.initialize_year(2024, Some(anchor), today).unwrap();
    assert!(!grid.slots[10].has_data);
    let cached_ranges: Vec<_> = grid.slots.iter().map(|slot| slot.date_range).collect();
    let cached_ordinals: Vec<_> = grid
        .slots
        .iter()
        .map(|slot| slot.weeks_since_birth)
        .collect();

    service
        .store()
        .save_year(2024, &records_with_entry_at(10))
        .unwrap();
    service.refresh(&mut grid, today).unwrap();

    assert!(grid.slots[10].has_data);
    for (index, slot) in grid.slots.iter().enumerate() {
        assert_eq!(slot.date_range, cached_ranges[index]);
        assert_eq!(slot.weeks_since_birth, cached_ordinals[index]);
    }
}
