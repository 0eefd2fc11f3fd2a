//! Raw record shapes as written by the producing screens

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// A field that producers store with more than one JSON shape, classified
/// once when the record is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum LooseValue {
    Text(String),
    Number(Number),
    Object(Map<String, Value>),
    List(Vec<Value>),
    /// `null` nested inside a present field, or a boolean
    Other(Value),
}

impl LooseValue {
    /// Look up a non-null member of an object value.
    pub fn field(&self, key: &str) -> Option<LooseValue> {
        match self {
            LooseValue::Object(map) => map
                .get(key)
                .filter(|v| !v.is_null())
                .cloned()
                .map(LooseValue::from),
            _ => None,
        }
    }
}

impl From<Value> for LooseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LooseValue::Text(s),
            Value::Number(n) => LooseValue::Number(n),
            Value::Object(map) => LooseValue::Object(map),
            Value::Array(items) => LooseValue::List(items),
            other => LooseValue::Other(other),
        }
    }
}

impl From<LooseValue> for Value {
    fn from(value: LooseValue) -> Self {
        match value {
            LooseValue::Text(s) => Value::String(s),
            LooseValue::Number(n) => Value::Number(n),
            LooseValue::Object(map) => Value::Object(map),
            LooseValue::List(items) => Value::Array(items),
            LooseValue::Other(v) => v,
        }
    }
}

impl From<&str> for LooseValue {
    fn from(value: &str) -> Self {
        LooseValue::Text(value.to_string())
    }
}

/// Booking written by the client self-service flow (`beauty_bookings`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientBookingRecord {
    pub id: Option<LooseValue>,
    pub date: Option<LooseValue>,
    pub time: Option<LooseValue>,
    pub user_name: Option<LooseValue>,
    /// Plain name or `{ name, price }`
    pub service: Option<LooseValue>,
    /// `"agent"` for AI-assigned bookings, otherwise `{ id, name }`
    pub professional: Option<LooseValue>,
    pub status: Option<LooseValue>,
    pub payment_method: Option<LooseValue>,
}

/// Booking entered by the owner from the agenda (`owner_bookings_db`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualBookingRecord {
    pub id: Option<LooseValue>,
    pub date: Option<LooseValue>,
    pub time: Option<LooseValue>,
    pub client: Option<LooseValue>,
    pub service: Option<LooseValue>,
    pub price_value: Option<LooseValue>,
    pub status: Option<LooseValue>,
    pub pro_id: Option<LooseValue>,
    pub payment_method: Option<LooseValue>,
}

/// Inclusive date range a professional is away
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Read a stored `{ start, end }` entry. Each bound is a `YYYY-MM-DD`
    /// day or an RFC 3339 timestamp, of which only the calendar day counts.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            start: parse_day(value.get("start")?)?,
            end: parse_day(value.get("end")?)?,
        })
    }
}

fn parse_day(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// `null` reads as no entries and a lone value as one entry
fn vacation_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

/// Staff member from `owner_staff_db`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LooseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LooseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<LooseValue>,
    /// Entries exactly as stored; see [`StaffRecord::vacation_ranges`]
    #[serde(
        default,
        deserialize_with = "vacation_entries",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub vacations: Vec<Value>,
    /// Producer fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StaffRecord {
    /// Vacation entries that read as date ranges. Unreadable entries stay in
    /// `vacations` untouched and never mark the professional as away.
    pub fn vacation_ranges(&self) -> impl Iterator<Item = VacationRange> + '_ {
        self.vacations.iter().filter_map(VacationRange::from_value)
    }
}

/// Service catalogue entry from `owner_services_db`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LooseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LooseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<LooseValue>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<LooseValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
