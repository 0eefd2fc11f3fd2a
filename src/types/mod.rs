//! Type definitions for salonbook

mod booking;
mod error;
mod record;

pub use booking::*;
pub use error::*;
pub use record::*;

use std::fmt;

/// Storage read warning types.
///
/// Reads never fail on bad data; problems are collected here and logged so
/// callers can still render whatever was recoverable.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageWarning {
    /// The store could not be read for this key
    LoadFailed(String),
    /// The blob is not valid JSON, or not a JSON array
    Corrupted(String),
    /// A single array element could not be used as a record
    InvalidEntry(String),
}

impl fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageWarning::LoadFailed(msg) => write!(f, "load failed: {}", msg),
            StorageWarning::Corrupted(msg) => write!(f, "corrupted: {}", msg),
            StorageWarning::InvalidEntry(msg) => write!(f, "invalid entry: {}", msg),
        }
    }
}
