//! Professional availability: vacation exclusion and the allocation used
//! when a client leaves the choice to the AI agent

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::services::normalizer::display_string;
use crate::services::stats::DATE_FORMAT;
use crate::types::{BookingStatus, StaffRecord, UnifiedBooking};

pub fn is_on_vacation(staff: &StaffRecord, date: NaiveDate) -> bool {
    staff.vacation_ranges().any(|range| range.contains(date))
}

/// Staff working on `date`, in stored order
pub fn available_professionals(staff: &[StaffRecord], date: NaiveDate) -> Vec<&StaffRecord> {
    staff.iter().filter(|s| !is_on_vacation(s, date)).collect()
}

/// Pick a professional for an `"agent"` booking.
///
/// Returns the id of the first staff member, in stored order, who is not on
/// vacation and has no booking in the same slot. Cancelled bookings do not
/// hold a slot. Staff without a resolvable id are never picked.
pub fn allocate_professional(
    staff: &[StaffRecord],
    bookings: &[UnifiedBooking],
    date: NaiveDate,
    time: &str,
) -> Option<String> {
    let day = date.format(DATE_FORMAT).to_string();
    let busy: HashSet<&str> = bookings
        .iter()
        .filter(|b| b.date == day && b.time == time)
        .filter(|b| b.status != BookingStatus::Cancelled)
        .map(|b| b.pro_id.as_str())
        .collect();

    available_professionals(staff, date)
        .into_iter()
        .map(|s| display_string(s.id.as_ref()))
        .find(|id| !id.is_empty() && !busy.contains(id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookingSource, LooseValue};
    use serde_json::{json, Map};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn make_staff(id: &str, vacations: Vec<(u32, u32)>) -> StaffRecord {
        StaffRecord {
            id: Some(LooseValue::from(id)),
            name: Some(LooseValue::from(id)),
            role: None,
            vacations: vacations
                .into_iter()
                .map(|(start, end)| {
                    json!({"start": day(start).to_string(), "end": day(end).to_string()})
                })
                .collect(),
            extra: Map::new(),
        }
    }

    fn make_booking(pro_id: &str, date: &str, time: &str, status: BookingStatus) -> UnifiedBooking {
        UnifiedBooking {
            id: format!("{}-{}", pro_id, time),
            date: date.to_string(),
            time: time.to_string(),
            client: "Cliente".to_string(),
            service: "Corte".to_string(),
            price_value: 0.0,
            status,
            pro_id: pro_id.to_string(),
            source: BookingSource::App,
            payment_method: None,
        }
    }

    #[test]
    fn test_is_on_vacation() {
        let staff = make_staff("p1", vec![(2, 9)]);
        assert!(!is_on_vacation(&staff, day(1)));
        assert!(is_on_vacation(&staff, day(2)));
        assert!(is_on_vacation(&staff, day(9)));
        assert!(!is_on_vacation(&staff, day(10)));
    }

    #[test]
    fn test_available_professionals_excludes_vacation() {
        let staff = vec![
            make_staff("p1", vec![]),
            make_staff("p2", vec![(1, 3)]),
            make_staff("p3", vec![(10, 12)]),
        ];
        let available = available_professionals(&staff, day(2));
        let ids: Vec<String> = available
            .iter()
            .map(|s| display_string(s.id.as_ref()))
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_allocate_first_free() {
        let staff = vec![make_staff("p1", vec![]), make_staff("p2", vec![])];
        let bookings = vec![make_booking("p1", "2024-06-05", "10:00", BookingStatus::Confirmed)];

        assert_eq!(
            allocate_professional(&staff, &bookings, day(5), "10:00"),
            Some("p2".to_string())
        );
        assert_eq!(
            allocate_professional(&staff, &bookings, day(5), "11:00"),
            Some("p1".to_string())
        );
    }

    #[test]
    fn test_allocate_skips_vacation() {
        let staff = vec![make_staff("p1", vec![(5, 5)]), make_staff("p2", vec![])];
        assert_eq!(
            allocate_professional(&staff, &[], day(5), "10:00"),
            Some("p2".to_string())
        );
    }

    #[test]
    fn test_allocate_cancelled_frees_slot() {
        let staff = vec![make_staff("p1", vec![])];
        let bookings = vec![make_booking("p1", "2024-06-05", "10:00", BookingStatus::Cancelled)];
        assert_eq!(
            allocate_professional(&staff, &bookings, day(5), "10:00"),
            Some("p1".to_string())
        );
    }

    #[test]
    fn test_allocate_none_when_all_busy() {
        let staff = vec![make_staff("p1", vec![]), make_staff("p2", vec![(1, 30)])];
        let bookings = vec![make_booking("p1", "2024-06-05", "10:00", BookingStatus::Completed)];
        assert_eq!(allocate_professional(&staff, &bookings, day(5), "10:00"), None);
    }

    #[test]
    fn test_timestamp_vacations_keep_professional_working_elsewhere() {
        let staff: StaffRecord = serde_json::from_value(json!({
            "id": "p1",
            "name": "Joana",
            "vacations": [{"start": "2024-08-01T00:00:00.000Z", "end": "2024-08-15T00:00:00.000Z"}]
        }))
        .unwrap();
        let staff = vec![staff];

        assert_eq!(
            allocate_professional(&staff, &[], day(5), "10:00"),
            Some("p1".to_string())
        );
        let august = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
        assert_eq!(allocate_professional(&staff, &[], august, "10:00"), None);
    }

    #[test]
    fn test_unreadable_vacation_does_not_block() {
        let mut staff = make_staff("p1", vec![]);
        staff.vacations.push(json!({"start": "soon"}));
        assert!(!is_on_vacation(&staff, day(5)));
        assert_eq!(available_professionals(&[staff], day(5)).len(), 1);
    }

    #[test]
    fn test_allocate_skips_staff_without_id() {
        let mut nameless = make_staff("x", vec![]);
        nameless.id = None;
        let staff = vec![nameless, make_staff("p2", vec![])];
        assert_eq!(
            allocate_professional(&staff, &[], day(5), "10:00"),
            Some("p2".to_string())
        );
    }
}
