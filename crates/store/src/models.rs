//! Booking records as they appear in storage.
//!
//! Two shapes have been written under the `bookings` key over time:
//!
//! ```json
//! [{"id": 1760620800123, "center": {"Hospital Name": "..."}, "date": "...", "time": "10:00", "formattedDate": "..."}]
//! [{"id": 1760620800123, "Hospital Name": "...", "City": "...", "bookingDate": "...", "bookingTime": "10:00"}]
//! ```
//!
//! There is no version marker. [`StoredBooking`] accepts either and the shape
//! is decided by probing for a nested `center` object. Resolution fills each
//! field from the first non-empty candidate, so a nested record can still
//! borrow a top-level field and vice versa.

use serde::Deserialize;
use serde_json::Value;

use medfind_core::models::{
    booking::Booking,
    center::Center,
    lenient::{optional_id, optional_string_or_number},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingShape {
    Nested,
    Flat,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredBooking {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "optional_center")]
    pub center: Option<Center>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(rename = "formattedDate", default)]
    pub formatted_date: Option<String>,

    #[serde(rename = "bookingDate", default)]
    pub booking_date: Option<String>,

    #[serde(rename = "bookingTime", default)]
    pub booking_time: Option<String>,

    #[serde(rename = "Hospital Name", default, deserialize_with = "optional_string_or_number")]
    pub hospital_name: Option<String>,

    #[serde(rename = "Address", default, deserialize_with = "optional_string_or_number")]
    pub address: Option<String>,

    #[serde(rename = "City", default, deserialize_with = "optional_string_or_number")]
    pub city: Option<String>,

    #[serde(rename = "State", default, deserialize_with = "optional_string_or_number")]
    pub state: Option<String>,

    #[serde(rename = "ZIP Code", default, deserialize_with = "optional_string_or_number")]
    pub zip_code: Option<String>,

    #[serde(
        rename = "Hospital overall rating",
        default,
        deserialize_with = "optional_string_or_number"
    )]
    pub overall_rating: Option<String>,
}

/// A `center` that is not an object is treated as absent.
fn optional_center<'de, D>(deserializer: D) -> Result<Option<Center>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// First candidate that is present and non-empty.
fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

fn fill(field: &mut String, fallback: &Option<String>) {
    if field.is_empty() {
        if let Some(value) = fallback.as_ref().filter(|v| !v.is_empty()) {
            field.clone_from(value);
        }
    }
}

impl StoredBooking {
    pub fn shape(&self) -> BookingShape {
        if self.center.is_some() {
            BookingShape::Nested
        } else {
            BookingShape::Flat
        }
    }

    /// Normalize into a [`Booking`]. `index` is the record's position in the
    /// stored array and stands in for a missing id. Returns `None` when no
    /// time can be found.
    pub fn resolve(self, index: usize) -> Option<Booking> {
        let time = first_present([self.time.as_ref(), self.booking_time.as_ref()])?;

        let id = self.id.filter(|id| *id != 0).unwrap_or(index as i64);

        let mut center = self.center.unwrap_or_default();
        fill(&mut center.hospital_name, &self.hospital_name);
        fill(&mut center.address, &self.address);
        fill(&mut center.city, &self.city);
        fill(&mut center.state, &self.state);
        fill(&mut center.zip_code, &self.zip_code);
        if center.overall_rating.as_deref().is_none_or(str::is_empty) {
            center.overall_rating = self.overall_rating.filter(|r| !r.is_empty());
        }

        let date = first_present([self.date.as_ref(), self.booking_date.as_ref()])
            .unwrap_or_default();
        let formatted_date = first_present([
            self.formatted_date.as_ref(),
            self.booking_date.as_ref(),
            self.date.as_ref(),
        ])
        .unwrap_or_default();

        Some(Booking {
            id,
            center,
            date,
            time,
            formatted_date,
        })
    }
}
