//! Unified booking view model and derived counters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which raw collection a unified booking came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingSource {
    /// Client self-service flow (`beauty_bookings`)
    App,
    /// Owner agenda entry (`owner_bookings_db`)
    Manual,
}

impl fmt::Display for BookingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            BookingSource::App => "app",
            BookingSource::Manual => "manual",
        })
    }
}

/// Booking status.
///
/// Callers follow `confirmed → {completed, cancelled, no-show}` by convention,
/// but nothing here validates a transition. Unknown strings round-trip as
/// [`BookingStatus::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
    Waiting,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no-show",
            BookingStatus::Waiting => "waiting",
            BookingStatus::Other(s) => s,
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        match value {
            "confirmed" => BookingStatus::Confirmed,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            "no-show" => BookingStatus::NoShow,
            "waiting" => BookingStatus::Waiting,
            other => BookingStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match BookingStatus::from(value.as_str()) {
            BookingStatus::Other(_) => BookingStatus::Other(value),
            known => known,
        }
    }
}

impl From<BookingStatus> for String {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Render-safe booking merged from either raw collection.
///
/// `client`, `service` and `price_value` are always resolved primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedBooking {
    pub id: String,
    /// `YYYY-MM-DD`, carried through unvalidated
    pub date: String,
    /// `HH:MM`, carried through unvalidated
    pub time: String,
    pub client: String,
    pub service: String,
    pub price_value: f64,
    pub status: BookingStatus,
    pub pro_id: String,
    pub source: BookingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Dashboard counters derived from the unified list
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    /// Distinct client display names (case-sensitive)
    pub total_clients: usize,
    /// Sum over completed bookings, all-time
    pub monthly_revenue: f64,
    pub today_bookings_count: usize,
}
