//! Booking normalizer service
//!
//! Merges the client self-service collection and the owner agenda collection
//! into one list of [`UnifiedBooking`]s, and writes status edits back into
//! the raw collections they came from.

use serde_json::Value;

use crate::services::normalizer::{display_string, normalize_client, normalize_manual};
use crate::services::StatsAggregator;
use crate::storage::{BookingRepository, KeyValueStore, CLIENT_BOOKINGS_KEY, MANUAL_BOOKINGS_KEY};
use crate::types::{
    BookingStats, BookingStatus, LooseValue, Result, StorageWarning, UnifiedBooking,
};

/// Result of loading and merging both booking collections
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    /// App bookings first, then manual bookings, each in stored order
    pub bookings: Vec<UnifiedBooking>,
    /// Data problems found while reading (never fatal)
    pub warnings: Vec<StorageWarning>,
}

/// Fresh view of the bookings and the counters derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSnapshot {
    pub bookings: Vec<UnifiedBooking>,
    pub stats: BookingStats,
    pub warnings: Vec<StorageWarning>,
}

pub struct BookingNormalizer<S: KeyValueStore> {
    repository: BookingRepository<S>,
}

impl<S: KeyValueStore> BookingNormalizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            repository: BookingRepository::new(store),
        }
    }

    pub fn repository(&self) -> &BookingRepository<S> {
        &self.repository
    }

    /// Read both collections and merge them. Missing or corrupt collections
    /// count as empty.
    pub fn load_and_normalize(&self) -> LoadResult {
        let client = self.repository.client_bookings();
        let manual = self.repository.manual_bookings();

        let mut bookings = Vec::with_capacity(client.records.len() + manual.records.len());
        bookings.extend(client.records.iter().map(normalize_client));
        bookings.extend(manual.records.iter().map(normalize_manual));

        let mut warnings = client.warnings;
        warnings.extend(manual.warnings);

        LoadResult { bookings, warnings }
    }

    /// [`load_and_normalize`](Self::load_and_normalize) plus stats for today
    pub fn snapshot(&self) -> BookingSnapshot {
        let LoadResult { bookings, warnings } = self.load_and_normalize();
        let stats = StatsAggregator::compute(&bookings);
        BookingSnapshot {
            bookings,
            stats,
            warnings,
        }
    }

    /// Set the status of every stored booking with this id, in both
    /// collections, then reload.
    ///
    /// `payment_method` overwrites the stored one only when given. A
    /// collection is rewritten only if it held a match, so an unknown id
    /// leaves storage untouched. Any status string is accepted.
    pub fn update_status(
        &self,
        id: &str,
        new_status: &BookingStatus,
        payment_method: Option<&str>,
    ) -> Result<BookingSnapshot> {
        let mut matched = 0;

        for key in [CLIENT_BOOKINGS_KEY, MANUAL_BOOKINGS_KEY] {
            let mut records = self.repository.load_raw(key).records;
            let count = apply_status(&mut records, id, new_status, payment_method);
            if count > 0 {
                self.repository.save_raw(key, &records)?;
                matched += count;
            }
        }

        if matched == 0 {
            tracing::debug!(id, "no booking matched status update");
        } else {
            tracing::info!(id, status = %new_status, matched, "updated booking status");
        }

        Ok(self.snapshot())
    }
}

/// Apply a status edit in place; returns how many records matched
fn apply_status(
    records: &mut [Value],
    id: &str,
    new_status: &BookingStatus,
    payment_method: Option<&str>,
) -> usize {
    let mut count = 0;
    for record in records.iter_mut() {
        if record_id(record).as_deref() != Some(id) {
            continue;
        }
        if let Value::Object(map) = record {
            map.insert(
                "status".to_string(),
                Value::String(new_status.as_str().to_string()),
            );
            if let Some(method) = payment_method {
                map.insert("paymentMethod".to_string(), Value::String(method.to_string()));
            }
            count += 1;
        }
    }
    count
}

/// Stored id as display text, so numeric ids match their string form
fn record_id(record: &Value) -> Option<String> {
    record
        .get("id")
        .filter(|v| !v.is_null())
        .map(|v| display_string(Some(&LooseValue::from(v.clone()))))
}
