use serde::{Deserialize, Serialize};

use super::center::Center;

/// A confirmed appointment.
///
/// The center is a snapshot taken at booking time. `date` is an RFC 3339
/// timestamp and `formatted_date` caches its human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub center: Center,
    pub date: String,
    pub time: String,
    pub formatted_date: String,
}
