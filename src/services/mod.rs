//! Services for booking normalization, stats and agenda views

pub mod agenda;
pub mod availability;
pub mod booking_loader;
pub mod normalizer;
pub mod stats;

pub use booking_loader::{BookingNormalizer, BookingSnapshot, LoadResult};
pub use normalizer::{display_string, parse_price};
pub use stats::StatsAggregator;
