//! # MedFind Core
//!
//! Domain types and client-side state for the medical center appointment
//! finder: directory records, bookings, the state/city selection machine,
//! the date and time picker, and the routes between views.
//!
//! Nothing in this crate performs I/O. Fetching lives in `medfind-client`
//! and persistence in `medfind-store`.

pub mod errors;
pub mod models;
pub mod navigation;
pub mod picker;
pub mod selection;
