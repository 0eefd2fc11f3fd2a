//! Storage collaborator: an opaque key → string store plus typed access
//! to the salon collections kept in it

mod file_store;
mod memory_store;
mod repository;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use repository::{BookingRepository, Loaded};

use crate::types::Result;

/// Client self-service bookings
pub const CLIENT_BOOKINGS_KEY: &str = "beauty_bookings";
/// Owner-entered agenda bookings
pub const MANUAL_BOOKINGS_KEY: &str = "owner_bookings_db";
/// Staff records
pub const STAFF_KEY: &str = "owner_staff_db";
/// Service catalogue
pub const SERVICES_KEY: &str = "owner_services_db";
/// `"true"` while the onboarding demo data is active
pub const DEMO_FLAG_KEY: &str = "beauty_is_demo_active";

/// Key-value store holding one string blob per key.
///
/// Writes replace the whole value; there is no partial update and no
/// versioning, so the last writer of a key wins.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>>;
}
