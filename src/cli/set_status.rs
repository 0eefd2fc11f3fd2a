//! `salonbook set-status` subcommand for closing out or cancelling bookings

use clap::Args;

use crate::services::BookingNormalizer;
use crate::storage::KeyValueStore;
use crate::types::{BookingStatus, Result, SalonError, UnifiedBooking};

/// Change a booking's status
#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Booking id (matches in both the app and the manual collection)
    #[arg(value_name = "BOOKING_ID")]
    pub id: String,

    /// New status: confirmed, completed, cancelled, no-show, waiting, ...
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Record how the booking was paid (kept unchanged when omitted)
    #[arg(long, value_name = "METHOD")]
    pub payment: Option<String>,

    /// Print the updated bookings as JSON
    #[arg(long)]
    pub json: bool,
}

impl SetStatusArgs {
    pub fn run<S: KeyValueStore>(self, normalizer: &BookingNormalizer<S>) -> Result<()> {
        let status = BookingStatus::from(self.status);
        let snapshot = normalizer.update_status(&self.id, &status, self.payment.as_deref())?;

        let updated: Vec<&UnifiedBooking> = snapshot
            .bookings
            .iter()
            .filter(|b| b.id == self.id)
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&updated)
                .map_err(|e| SalonError::Parse(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        if updated.is_empty() {
            println!("No booking with id '{}'", self.id);
        }
        for booking in updated {
            println!(
                "{} ({}) {} {} -> {}",
                booking.id, booking.source, booking.date, booking.time, booking.status
            );
        }
        Ok(())
    }
}
