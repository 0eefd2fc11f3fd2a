//! Dashboard counters over unified bookings

use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashSet;

use crate::types::{BookingStats, BookingStatus, UnifiedBooking};

/// Date format bookings are stored with
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct StatsAggregator;

impl StatsAggregator {
    /// Counters relative to today's local date
    pub fn compute(bookings: &[UnifiedBooking]) -> BookingStats {
        Self::compute_on(bookings, Local::now().date_naive())
    }

    /// Counters relative to an explicit `today`.
    ///
    /// `monthly_revenue` sums every completed booking in the list, whatever
    /// its date. Use [`StatsAggregator::revenue_in_month`] for a month total.
    pub fn compute_on(bookings: &[UnifiedBooking], today: NaiveDate) -> BookingStats {
        let today = today.format(DATE_FORMAT).to_string();

        let clients: HashSet<&str> = bookings.iter().map(|b| b.client.as_str()).collect();

        let monthly_revenue: f64 = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.price_value)
            .sum();

        let today_bookings_count = bookings.iter().filter(|b| b.date == today).count();

        BookingStats {
            total_clients: clients.len(),
            monthly_revenue,
            today_bookings_count,
        }
    }

    /// Completed revenue for one calendar month. Bookings whose date does
    /// not parse are left out.
    pub fn revenue_in_month(bookings: &[UnifiedBooking], year: i32, month: u32) -> f64 {
        bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .filter(|b| {
                NaiveDate::parse_from_str(&b.date, DATE_FORMAT)
                    .is_ok_and(|d| d.year() == year && d.month() == month)
            })
            .map(|b| b.price_value)
            .sum()
    }
}
