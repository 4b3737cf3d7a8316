use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use medfind_core::{
    errors::{FinderError, FinderResult},
    models::{booking::Booking, center::Center, lenient::id_from_value},
    picker::{BookingDraft, format_date, is_slot, to_iso_timestamp},
};

use crate::BOOKINGS_KEY;
use crate::models::StoredBooking;
use crate::storage::Storage;

/// Issues booking ids from the epoch-millisecond clock.
///
/// An id is never lower than one past the previous id issued here, nor one
/// past the highest id already stored.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn next_id(&self, stored_max: Option<i64>) -> i64 {
        let now = Utc::now().timestamp_millis();
        let floor = stored_max.unwrap_or(i64::MIN).saturating_add(1);
        let previous = self.last.load(Ordering::Relaxed).saturating_add(1);
        let id = now.max(floor).max(previous);
        self.last.store(id, Ordering::Relaxed);
        id
    }
}

/// One element of the stored array.
enum Record {
    /// Normalized; written back in the nested shape.
    Booking(Booking),
    /// Could not be normalized; written back exactly as read.
    Raw(Value),
}

impl Record {
    fn id(&self) -> Option<i64> {
        match self {
            Record::Booking(booking) => Some(booking.id),
            Record::Raw(value) => value.get("id").and_then(id_from_value),
        }
    }

    fn into_value(self) -> FinderResult<Value> {
        match self {
            Record::Booking(booking) => {
                serde_json::to_value(booking).map_err(|e| FinderError::Parse(e.to_string()))
            }
            Record::Raw(value) => Ok(value),
        }
    }
}

/// Bookings persisted as one JSON array under [`BOOKINGS_KEY`].
///
/// Every mutation reads the whole collection and writes it back. Insertion
/// order is display order. Records that cannot be shown (no time, wrong
/// field types, not an object) are hidden from [`BookingStore::list`] but
/// survive every write unchanged.
pub struct BookingStore<S> {
    storage: S,
    ids: IdGenerator,
}

impl<S: Storage> BookingStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            ids: IdGenerator::default(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All bookings in insertion order.
    ///
    /// A missing key or unparseable JSON reads as an empty collection.
    /// Records in either stored shape are normalized; records without a time
    /// are skipped.
    pub fn list(&self) -> FinderResult<Vec<Booking>> {
        let bookings = self
            .load()?
            .into_iter()
            .filter_map(|record| match record {
                Record::Booking(booking) => Some(booking),
                Record::Raw(_) => None,
            })
            .collect();
        Ok(bookings)
    }

    fn load(&self) -> FinderResult<Vec<Record>> {
        let Some(raw) = self.storage.get_item(BOOKINGS_KEY)? else {
            return Ok(Vec::new());
        };

        let values = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(values)) => values,
            Ok(other) => {
                warn!(kind = json_kind(&other), "stored bookings are not an array, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(error = %e, "stored bookings are not valid JSON, treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let stored = match serde_json::from_value::<StoredBooking>(value.clone()) {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(index, error = %e, "skipping unreadable booking record");
                    records.push(Record::Raw(value));
                    continue;
                }
            };
            let shape = stored.shape();
            match stored.resolve(index) {
                Some(booking) => {
                    debug!(index, id = booking.id, ?shape, "loaded booking");
                    records.push(Record::Booking(booking));
                }
                None => {
                    warn!(index, ?shape, "skipping booking record without a time");
                    records.push(Record::Raw(value));
                }
            }
        }

        Ok(records)
    }

    /// Book `center` for `date` at `time`.
    ///
    /// Fails with a validation error, without touching storage, when either
    /// the date or the time is missing or the time is not a bookable slot.
    pub fn create(
        &self,
        center: &Center,
        date: Option<NaiveDate>,
        time: Option<&str>,
    ) -> FinderResult<Booking> {
        let (Some(date), Some(time)) = (date, time.filter(|t| !t.is_empty())) else {
            return Err(FinderError::Validation(
                "Please select both date and time".into(),
            ));
        };
        if !is_slot(time) {
            return Err(FinderError::Validation(format!(
                "{} is not an available time slot",
                time
            )));
        }

        let mut records = self.load()?;
        let id = self.ids.next_id(records.iter().filter_map(Record::id).max());

        let booking = Booking {
            id,
            center: center.clone(),
            date: to_iso_timestamp(date),
            time: time.to_string(),
            formatted_date: format_date(date),
        };
        records.push(Record::Booking(booking.clone()));
        self.write_records(records)?;

        debug!(
            id,
            hospital = %booking.center.hospital_name,
            date = %booking.formatted_date,
            time = %booking.time,
            "created booking"
        );
        Ok(booking)
    }

    pub fn create_from_draft(&self, draft: &BookingDraft) -> FinderResult<Booking> {
        self.create(draft.center(), draft.selected_date(), draft.selected_time())
    }

    /// Drop the booking with `id`. Returns `false`, and leaves storage
    /// untouched, when no listed booking has that id.
    pub fn remove(&self, id: i64) -> FinderResult<bool> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| !matches!(record, Record::Booking(booking) if booking.id == id));

        if records.len() == before {
            debug!(id, "no booking to remove");
            return Ok(false);
        }
        self.write_records(records)?;
        Ok(true)
    }

    pub fn clear(&self) -> FinderResult<()> {
        self.write_records(Vec::new())
    }

    fn write_records(&self, records: Vec<Record>) -> FinderResult<()> {
        let count = records.len();
        let values = records
            .into_iter()
            .map(Record::into_value)
            .collect::<FinderResult<Vec<Value>>>()?;
        let json = serde_json::to_string(&values).map_err(|e| FinderError::Parse(e.to_string()))?;
        self.storage.set_item(BOOKINGS_KEY, &json)?;
        debug!(count, "persisted bookings");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
