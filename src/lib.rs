//! Booking normalizer for the salon management demo
//!
//! Merges client self-service bookings and owner agenda bookings kept as
//! JSON blobs in a key-value store into one render-safe list, derives the
//! dashboard counters, and writes status edits back to the raw collections.

pub mod cli;
pub mod logging;
pub mod services;
pub mod storage;
pub mod types;
