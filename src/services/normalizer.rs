//! Booking field normalization
//!
//! Resolves the loosely-shaped fields of raw booking records into plain
//! display strings and prices, and maps both raw record kinds onto
//! [`UnifiedBooking`]. Every function here is total.

use serde_json::{Number, Value};

use crate::types::{
    BookingSource, BookingStatus, ClientBookingRecord, LooseValue, ManualBookingRecord,
    UnifiedBooking,
};

/// Fallback client name when a record carries none
pub const DEFAULT_CLIENT: &str = "Cliente";

/// Professional assumed when a booking has no resolvable staff id
pub const DEFAULT_PRO_ID: &str = "p1";

/// Label for objects with neither `name` nor `title`
const UNNAMED_OBJECT: &str = "Info";

/// Resolve any stored value to text that is safe to render.
///
/// - string → unchanged
/// - number → decimal text (`35`, `12.5`)
/// - object with a truthy `name`, else a truthy `title` → that member as text
/// - any other object or list → `"Info"`
/// - absent, `null` or boolean → `""`
///
/// # Examples
/// ```
/// use salonbook::services::normalizer::display_string;
/// use salonbook::types::LooseValue;
/// use serde_json::json;
///
/// assert_eq!(display_string(Some(&LooseValue::from(json!({"name": "X"})))), "X");
/// assert_eq!(display_string(Some(&LooseValue::from(json!({})))), "Info");
/// assert_eq!(display_string(None), "");
/// ```
pub fn display_string(value: Option<&LooseValue>) -> String {
    match value {
        Some(LooseValue::Text(s)) => s.clone(),
        Some(LooseValue::Number(n)) => format_number(n),
        Some(LooseValue::Object(map)) => ["name", "title"]
            .iter()
            .find_map(|key| map.get(*key).filter(|v| is_truthy(v)))
            .map(coerce_to_text)
            .unwrap_or_else(|| UNNAMED_OBJECT.to_string()),
        Some(LooseValue::List(_)) => UNNAMED_OBJECT.to_string(),
        Some(LooseValue::Other(_)) | None => String::new(),
    }
}

/// Parse a stored price into a number, `0.0` on anything unusable.
///
/// Strips `€`, treats `,` as the decimal separator and reads the leading
/// numeric part of the text, so `"35 €"` and `"12,50€"` both parse.
/// Values that overflow to infinity, such as `"1e400"`, also count as
/// unusable and yield `0.0`, so a price is always finite.
///
/// # Examples
/// ```
/// use salonbook::services::normalizer::parse_price;
/// use salonbook::types::LooseValue;
///
/// assert_eq!(parse_price(Some(&LooseValue::from("35€"))), 35.0);
/// assert_eq!(parse_price(Some(&LooseValue::from("12,50€"))), 12.5);
/// assert_eq!(parse_price(None), 0.0);
/// ```
pub fn parse_price(value: Option<&LooseValue>) -> f64 {
    let parsed = match value {
        Some(LooseValue::Number(n)) => n.as_f64(),
        Some(LooseValue::Text(s)) => parse_price_text(s),
        _ => None,
    };
    parsed.filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// Map a client self-service record onto the unified shape
pub fn normalize_client(record: &ClientBookingRecord) -> UnifiedBooking {
    let pro_id = record
        .professional
        .as_ref()
        .and_then(|p| p.field("id"))
        .map(|id| display_string(Some(&id)))
        .unwrap_or_else(|| DEFAULT_PRO_ID.to_string());

    let price = record.service.as_ref().and_then(|s| s.field("price"));

    UnifiedBooking {
        id: display_string(record.id.as_ref()),
        date: display_string(record.date.as_ref()),
        time: display_string(record.time.as_ref()),
        client: client_name(record.user_name.as_ref()),
        service: display_string(record.service.as_ref()),
        price_value: parse_price(price.as_ref()),
        status: status_or_default(record.status.as_ref()),
        pro_id,
        source: BookingSource::App,
        payment_method: record.payment_method.as_ref().map(|m| display_string(Some(m))),
    }
}

/// Map an owner-entered agenda record onto the unified shape
pub fn normalize_manual(record: &ManualBookingRecord) -> UnifiedBooking {
    let pro_id = match &record.pro_id {
        Some(id) => display_string(Some(id)),
        None => DEFAULT_PRO_ID.to_string(),
    };

    UnifiedBooking {
        id: display_string(record.id.as_ref()),
        date: display_string(record.date.as_ref()),
        time: display_string(record.time.as_ref()),
        client: client_name(record.client.as_ref()),
        service: display_string(record.service.as_ref()),
        price_value: parse_price(record.price_value.as_ref()),
        status: status_or_default(record.status.as_ref()),
        pro_id,
        source: BookingSource::Manual,
        payment_method: record.payment_method.as_ref().map(|m| display_string(Some(m))),
    }
}

/// Resolved client name, never empty
fn client_name(value: Option<&LooseValue>) -> String {
    let name = display_string(value);
    if name.is_empty() {
        DEFAULT_CLIENT.to_string()
    } else {
        name
    }
}

fn status_or_default(value: Option<&LooseValue>) -> BookingStatus {
    match value {
        Some(v) => BookingStatus::from(display_string(Some(v))),
        None => BookingStatus::Confirmed,
    }
}

/// Integers print without a fractional part, like the producing screens do.
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text for a `name`/`title` member. Nested objects resolve recursively.
fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        other => display_string(Some(&LooseValue::from(other.clone()))),
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned = text.replace('€', "").replace(',', ".");
    leading_number(cleaned.trim_start())?.parse().ok()
}

/// Longest prefix of `s` that reads as a decimal number: optional sign,
/// digits with at most one `.`, optional exponent.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
