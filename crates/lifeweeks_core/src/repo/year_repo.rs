//! Year record store contract and key-value implementation.
//!
//! # Responsibility
//! - Persist and retrieve the per-year array of week records and the
//!   birth date.
//! - Migrate legacy payload shapes at this boundary, so the grid core
//!   only ever sees the normalized schema.
//!
//! # Invariants
//! - `load_year` always returns exactly `SLOTS_PER_YEAR` records; absent
//!   data is an empty year, never an error.
//! - Current payloads carry an explicit `schema` version; legacy-shape
//!   detection happens exactly once, here.

use crate::model::date::CalendarDate;
use crate::model::memory::{empty_year_records, BirthAnchor, EntryKind, MemoryEntry, WeekRecord};
use crate::model::week::SLOTS_PER_YEAR;
use crate::repo::kv::{KeyValueStore, KvError};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload schema version written by this build.
pub const CURRENT_SCHEMA: u32 = 2;

const BIRTH_DATE_KEY: &str = "birth_date";
const LEGACY_GLOBAL_KEY: &str = "life_data";

static YEAR_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^year_(\d{1,4})$").expect("year key pattern is valid"));

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for year-store persistence and payload decoding.
#[derive(Debug)]
pub enum StoreError {
    Kv(KvError),
    /// Stored payload does not match any known shape.
    InvalidPayload {
        key: String,
        message: String,
    },
    /// Payload was written by a newer build than this one.
    UnsupportedSchema {
        key: String,
        found: u32,
        supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::InvalidPayload { key, message } => {
                write!(f, "invalid stored payload under `{key}`: {message}")
            }
            Self::UnsupportedSchema {
                key,
                found,
                supported,
            } => write!(
                f,
                "payload under `{key}` has schema {found}, newer than supported {supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::InvalidPayload { .. } => None,
            Self::UnsupportedSchema { .. } => None,
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Store contract the grid service depends on.
pub trait YearDataStore {
    /// Week records for `year`; exactly `SLOTS_PER_YEAR` entries, empty
    /// when nothing was persisted.
    fn load_year(&self, year: i32) -> StoreResult<Vec<WeekRecord>>;
    fn save_year(&self, year: i32, records: &[WeekRecord]) -> StoreResult<()>;
    fn load_birth(&self) -> StoreResult<Option<BirthAnchor>>;
    fn save_birth(&self, birth: BirthAnchor) -> StoreResult<()>;
    /// Years with persisted records, ascending.
    fn stored_years(&self) -> StoreResult<Vec<i32>>;
}

/// Versioned on-disk envelope for one year's records.
#[derive(Debug, Serialize, Deserialize)]
struct YearEnvelope {
    schema: u32,
    records: Vec<WeekRecord>,
}

/// Year store over any key-value backend.
///
/// Layout: one JSON envelope per year under `year_<N>`, the birth date
/// string under `birth_date`. Legacy entries (a global `life_data` array
/// from the single-year format, or per-record `memory` strings) are
/// migrated on first contact.
pub struct KvYearStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> KvYearStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn year_key(year: i32) -> String {
        format!("year_{year}")
    }

    /// Adopts the legacy single-year `life_data` entry into `year`.
    ///
    /// In the pre-year-keyed format that one array was the displayed
    /// year's data, so the first year loaded after the upgrade takes it
    /// over. Runs at most once; the legacy key is deleted afterwards.
    fn adopt_legacy_global(&self, year: i32) -> StoreResult<Option<Vec<WeekRecord>>> {
        let Some(raw) = self.kv.load(LEGACY_GLOBAL_KEY)? else {
            return Ok(None);
        };
        let records = decode_year_payload(LEGACY_GLOBAL_KEY, &raw)?;
        self.save_year(year, &records)?;
        self.kv.delete(LEGACY_GLOBAL_KEY)?;
        info!("event=legacy_migration module=store status=ok from={LEGACY_GLOBAL_KEY} to_year={year}");
        Ok(Some(records))
    }
}

impl<K: KeyValueStore> YearDataStore for KvYearStore<K> {
    fn load_year(&self, year: i32) -> StoreResult<Vec<WeekRecord>> {
        let key = Self::year_key(year);
        if let Some(raw) = self.kv.load(&key)? {
            return decode_year_payload(&key, &raw);
        }
        if let Some(records) = self.adopt_legacy_global(year)? {
            return Ok(records);
        }
        Ok(empty_year_records())
    }

    fn save_year(&self, year: i32, records: &[WeekRecord]) -> StoreResult<()> {
        let envelope = YearEnvelope {
            schema: CURRENT_SCHEMA,
            records: normalize_length(records.to_vec()),
        };
        let payload = serde_json::to_string(&envelope).map_err(|err| StoreError::InvalidPayload {
            key: Self::year_key(year),
            message: err.to_string(),
        })?;
        self.kv.save(&Self::year_key(year), &payload)?;
        Ok(())
    }

    fn load_birth(&self) -> StoreResult<Option<BirthAnchor>> {
        let Some(raw) = self.kv.load(BIRTH_DATE_KEY)? else {
            return Ok(None);
        };
        let date: CalendarDate = raw.parse().map_err(|err| StoreError::InvalidPayload {
            key: BIRTH_DATE_KEY.to_string(),
            message: format!("{err}"),
        })?;
        Ok(Some(BirthAnchor::new(date)))
    }

    fn save_birth(&self, birth: BirthAnchor) -> StoreResult<()> {
        self.kv.save(BIRTH_DATE_KEY, &birth.date().to_string())?;
        Ok(())
    }

    fn stored_years(&self) -> StoreResult<Vec<i32>> {
        let mut years = Vec::new();
        for key in self.kv.keys()? {
            if let Some(captures) = YEAR_KEY.captures(&key) {
                if let Ok(year) = captures[1].parse::<i32>() {
                    years.push(year);
                }
            }
        }
        years.sort_unstable();
        Ok(years)
    }
}

/// Decodes a stored year payload, migrating legacy shapes.
///
/// Shapes, resolved by one structural check:
/// - `{"schema": 2, "records": [...]}` — current envelope;
/// - a bare JSON array — schema 1, records in current shape or with a
///   single-string `memory` field per record.
fn decode_year_payload(key: &str, raw: &str) -> StoreResult<Vec<WeekRecord>> {
    let value: Value = serde_json::from_str(raw).map_err(|err| StoreError::InvalidPayload {
        key: key.to_string(),
        message: err.to_string(),
    })?;

    let records = match value {
        Value::Object(ref fields) => {
            let schema = fields
                .get("schema")
                .and_then(Value::as_u64)
                .ok_or_else(|| StoreError::InvalidPayload {
                    key: key.to_string(),
                    message: "object payload without numeric `schema` field".to_string(),
                })? as u32;
            if schema > CURRENT_SCHEMA {
                return Err(StoreError::UnsupportedSchema {
                    key: key.to_string(),
                    found: schema,
                    supported: CURRENT_SCHEMA,
                });
            }
            let raw_records = fields
                .get("records")
                .and_then(Value::as_array)
                .ok_or_else(|| StoreError::InvalidPayload {
                    key: key.to_string(),
                    message: "envelope without `records` array".to_string(),
                })?;
            decode_records(key, raw_records)?
        }
        Value::Array(ref raw_records) => {
            info!("event=legacy_migration module=store status=ok key={key} from_schema=1");
            decode_records(key, raw_records)?
        }
        _ => {
            return Err(StoreError::InvalidPayload {
                key: key.to_string(),
                message: "payload is neither an envelope object nor a record array".to_string(),
            });
        }
    };

    Ok(normalize_length(records))
}

fn decode_records(key: &str, raw_records: &[Value]) -> StoreResult<Vec<WeekRecord>> {
    raw_records
        .iter()
        .map(|raw| decode_record(key, raw))
        .collect()
}

fn decode_record(key: &str, raw: &Value) -> StoreResult<WeekRecord> {
    // Sparse legacy arrays hold nulls for weeks that were never touched.
    if raw.is_null() {
        return Ok(WeekRecord::default());
    }

    let fields = raw.as_object().ok_or_else(|| StoreError::InvalidPayload {
        key: key.to_string(),
        message: format!("record is not an object: {raw}"),
    })?;

    // Legacy per-record shape: one plain string under `memory`.
    if let Some(text) = fields.get("memory").and_then(Value::as_str) {
        let memories = if text.is_empty() {
            Vec::new()
        } else {
            vec![MemoryEntry::new(EntryKind::Memory, "", text)]
        };
        return Ok(WeekRecord { memories });
    }

    serde_json::from_value(raw.clone()).map_err(|err| StoreError::InvalidPayload {
        key: key.to_string(),
        message: format!("record does not match week-record shape: {err}"),
    })
}

/// Pads short record lists and truncates long ones to the grid size.
fn normalize_length(mut records: Vec<WeekRecord>) -> Vec<WeekRecord> {
    if records.len() != SLOTS_PER_YEAR {
        warn!(
            "event=record_resize module=store status=ok stored={} expected={SLOTS_PER_YEAR}",
            records.len()
        );
    }
    records.resize_with(SLOTS_PER_YEAR, WeekRecord::default);
    records
}
