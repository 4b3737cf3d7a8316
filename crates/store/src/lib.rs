pub mod models;
pub mod repositories;
pub mod storage;

pub use repositories::booking::BookingStore;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Storage key holding the serialized booking collection.
pub const BOOKINGS_KEY: &str = "bookings";
