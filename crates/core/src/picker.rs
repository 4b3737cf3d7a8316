//! # Date and Time Picker
//!
//! Appointment dates are a rolling window of seven calendar days starting
//! today in the local time zone. Times come from a fixed set of slots grouped
//! into morning, afternoon and evening.
//!
//! [`BookingDraft`] holds the in-progress choice for one center: picking a
//! new date clears the chosen time so the user must pick it again.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FinderError, FinderResult};
use crate::models::center::Center;

/// Number of days offered for booking, today included.
pub const AVAILABLE_DAYS: usize = 7;

pub const MORNING_SLOTS: [&str; 3] = ["09:00", "10:00", "11:00"];
pub const AFTERNOON_SLOTS: [&str; 4] = ["12:00", "13:00", "14:00", "15:00"];
pub const EVENING_SLOTS: [&str; 3] = ["16:00", "17:00", "18:00"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    /// The slots displayed under this heading.
    pub fn slots(&self) -> &'static [&'static str] {
        match self {
            TimeOfDay::Morning => &MORNING_SLOTS,
            TimeOfDay::Afternoon => &AFTERNOON_SLOTS,
            TimeOfDay::Evening => &EVENING_SLOTS,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Today plus the following six days, local time.
pub fn generate_available_dates() -> Vec<NaiveDate> {
    generate_available_dates_from(Local::now().date_naive())
}

pub fn generate_available_dates_from(today: NaiveDate) -> Vec<NaiveDate> {
    today.iter_days().take(AVAILABLE_DAYS).collect()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}

/// True when `time` is one of the bookable slots.
pub fn is_slot(time: &str) -> bool {
    TimeOfDay::ALL
        .iter()
        .any(|group| group.slots().contains(&time))
}

/// Classify an `HH:MM` string by its hour.
///
/// Hours below 12 are morning, below 17 afternoon, the rest evening. Note
/// that `16:00` lands in the afternoon even though it is listed among the
/// evening slots.
pub fn classify(time: &str) -> FinderResult<TimeOfDay> {
    let hour = time
        .split(':')
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok())
        .ok_or_else(|| FinderError::Validation(format!("Invalid time: {}", time)))?;

    Ok(if hour < 12 {
        TimeOfDay::Morning
    } else if hour < 17 {
        TimeOfDay::Afternoon
    } else {
        TimeOfDay::Evening
    })
}

/// Short US form, e.g. `Fri, Oct 16, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Local midnight of `date` as a UTC RFC 3339 timestamp with milliseconds.
pub fn to_iso_timestamp(date: NaiveDate) -> String {
    let midnight = date.and_time(NaiveTime::MIN);
    let utc = match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST transition
        None => midnight.and_utc(),
    };
    utc.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// In-progress date and time choice for a single center.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    center: Center,
    available_dates: Vec<NaiveDate>,
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
}

impl BookingDraft {
    pub fn new(center: Center) -> Self {
        Self::starting_on(center, Local::now().date_naive())
    }

    /// Build a draft whose window starts at `today`. The first day is preselected.
    pub fn starting_on(center: Center, today: NaiveDate) -> Self {
        let available_dates = generate_available_dates_from(today);
        let selected_date = available_dates.first().copied();
        Self {
            center,
            available_dates,
            selected_date,
            selected_time: None,
        }
    }

    pub fn center(&self) -> &Center {
        &self.center
    }

    pub fn available_dates(&self) -> &[NaiveDate] {
        &self.available_dates
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn select_date(&mut self, date: NaiveDate) -> FinderResult<()> {
        if !self.available_dates.contains(&date) {
            return Err(FinderError::Validation(format!(
                "{} is not an available date",
                date
            )));
        }
        self.selected_date = Some(date);
        self.selected_time = None;
        Ok(())
    }

    /// Select the date at `index` in the available window.
    pub fn select_day(&mut self, index: usize) -> FinderResult<()> {
        let date = self.available_dates.get(index).copied().ok_or_else(|| {
            FinderError::Validation(format!(
                "Day must be between 0 and {}",
                self.available_dates.len().saturating_sub(1)
            ))
        })?;
        self.select_date(date)
    }

    pub fn select_time(&mut self, time: &str) -> FinderResult<()> {
        if self.selected_date.is_none() {
            return Err(FinderError::Validation("Please select a date first".into()));
        }
        if !is_slot(time) {
            return Err(FinderError::Validation(format!(
                "{} is not an available time slot",
                time
            )));
        }
        self.selected_time = Some(time.to_string());
        Ok(())
    }

    pub fn can_confirm(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }
}
