//! Typed per-collection access on top of a [`KeyValueStore`]

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    KeyValueStore, CLIENT_BOOKINGS_KEY, DEMO_FLAG_KEY, MANUAL_BOOKINGS_KEY, SERVICES_KEY,
    STAFF_KEY,
};
use crate::types::{
    ClientBookingRecord, ManualBookingRecord, Result, SalonError, ServiceRecord, StaffRecord,
    StorageWarning, VacationRange,
};

/// Records recovered from one collection, plus whatever had to be dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub warnings: Vec<StorageWarning>,
}

impl<T> Loaded<T> {
    fn empty(warning: Option<StorageWarning>) -> Self {
        Self {
            records: Vec::new(),
            warnings: warning.into_iter().collect(),
        }
    }
}

/// Repository over the salon collections.
///
/// Reads are defensive: a missing key is an empty collection, and a corrupt
/// blob or unusable element becomes a [`StorageWarning`] instead of an error.
pub struct BookingRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BookingRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Array elements of a collection exactly as stored
    pub fn load_raw(&self, key: &str) -> Loaded<Value> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return Loaded::empty(None),
            Err(e) => {
                return Loaded::empty(Some(warn(
                    key,
                    StorageWarning::LoadFailed(e.to_string()),
                )))
            }
        };

        match parse_array(text) {
            Ok(records) => Loaded {
                records,
                warnings: Vec::new(),
            },
            Err(msg) => Loaded::empty(Some(warn(key, StorageWarning::Corrupted(msg)))),
        }
    }

    /// Replace a whole collection
    pub fn save_raw(&self, key: &str, records: &[Value]) -> Result<()> {
        let content = serde_json::to_string(records)
            .map_err(|e| SalonError::Parse(format!("Failed to serialize {}: {}", key, e)))?;
        self.store.set(key, &content)
    }

    /// Collection elements parsed as `T`; elements that are not JSON objects
    /// or do not fit `T` are skipped with a warning.
    pub fn load_records<T: DeserializeOwned>(&self, key: &str) -> Loaded<T> {
        let raw = self.load_raw(key);
        let mut warnings = raw.warnings;
        let mut records = Vec::with_capacity(raw.records.len());

        for (index, value) in raw.records.into_iter().enumerate() {
            if !value.is_object() {
                warnings.push(warn(
                    key,
                    StorageWarning::InvalidEntry(format!("element {} is not an object", index)),
                ));
                continue;
            }
            match serde_json::from_value(value) {
                Ok(record) => records.push(record),
                Err(e) => warnings.push(warn(
                    key,
                    StorageWarning::InvalidEntry(format!("element {}: {}", index, e)),
                )),
            }
        }

        Loaded { records, warnings }
    }

    pub fn client_bookings(&self) -> Loaded<ClientBookingRecord> {
        self.load_records(CLIENT_BOOKINGS_KEY)
    }

    pub fn manual_bookings(&self) -> Loaded<ManualBookingRecord> {
        self.load_records(MANUAL_BOOKINGS_KEY)
    }

    /// Staff records. A vacation entry that does not read as a date range
    /// is reported but kept, along with the professional it belongs to.
    pub fn staff(&self) -> Loaded<StaffRecord> {
        let mut loaded: Loaded<StaffRecord> = self.load_records(STAFF_KEY);
        for (index, member) in loaded.records.iter().enumerate() {
            for (entry, raw) in member.vacations.iter().enumerate() {
                if VacationRange::from_value(raw).is_none() {
                    loaded.warnings.push(warn(
                        STAFF_KEY,
                        StorageWarning::InvalidEntry(format!(
                            "element {} vacation {} is not a date range",
                            index, entry
                        )),
                    ));
                }
            }
        }
        loaded
    }

    pub fn services(&self) -> Loaded<ServiceRecord> {
        self.load_records(SERVICES_KEY)
    }

    pub fn is_demo_active(&self) -> bool {
        matches!(self.store.get(DEMO_FLAG_KEY), Ok(Some(flag)) if flag.trim() == "true")
    }
}

fn parse_array(text: String) -> std::result::Result<Vec<Value>, String> {
    let mut bytes = text.into_bytes();
    match simd_json::from_slice::<Value>(&mut bytes) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err("expected a JSON array".into()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

fn warn(key: &str, warning: StorageWarning) -> StorageWarning {
    tracing::warn!(key, %warning, "storage data problem");
    warning
}
