use std::io::Write;

use eyre::{Result, eyre};
use tracing::info;

use medfind_client::{DirectoryClient, centers_or_empty};
use medfind_core::{
    errors::FinderError,
    models::booking::Booking,
    navigation::Route,
    picker::{BookingDraft, TimeOfDay, format_date, generate_available_dates, is_today},
};
use medfind_store::{BookingStore, Storage};

use crate::commands::BookArgs;

pub fn handle_slots<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Select Date")?;
    for (index, date) in generate_available_dates().into_iter().enumerate() {
        let marker = if is_today(date) { " (Today)" } else { "" };
        writeln!(out, "  {}: {}{}", index, format_date(date), marker)?;
    }

    writeln!(out, "Select Time")?;
    for group in TimeOfDay::ALL {
        writeln!(out, "  {}: {}", group, group.slots().join(" "))?;
    }
    Ok(())
}

/// Pick a center from the search results, hand it to the booking view,
/// choose the date and time, confirm, then show the bookings list.
pub async fn handle_book<D, S, W>(
    directory: &D,
    store: &BookingStore<S>,
    args: BookArgs,
    out: &mut W,
) -> Result<()>
where
    D: DirectoryClient + ?Sized,
    S: Storage,
    W: Write,
{
    let centers = centers_or_empty(directory, &args.state, &args.city).await;
    let center = centers.into_iter().nth(args.center).ok_or_else(|| {
        FinderError::NotFound(format!(
            "Center #{} in {}, {}",
            args.center, args.city, args.state
        ))
    })?;

    let mut draft = booking_view(Route::Booking { center })?;
    draft.select_day(args.day)?;
    if let Some(time) = args.time.as_deref() {
        draft.select_time(time)?;
    }

    let booking = store.create_from_draft(&draft)?;
    info!(id = booking.id, "booking confirmed");
    writeln!(
        out,
        "Booked {} on {} at {} (id {})",
        booking.center.hospital_name, booking.formatted_date, booking.time, booking.id
    )?;

    writeln!(out, "Redirecting to {}", Route::MyBookings.path())?;
    handle_list(store, out)
}

/// The booking view only opens with a center handed over by the results page.
fn booking_view(route: Route) -> Result<BookingDraft> {
    match route {
        Route::Booking { center } => Ok(BookingDraft::new(center)),
        other => Err(eyre!("{} does not carry a center", other.path())),
    }
}

pub fn handle_list<S, W>(store: &BookingStore<S>, out: &mut W) -> Result<()>
where
    S: Storage,
    W: Write,
{
    let bookings = store.list()?;
    writeln!(out, "My Bookings")?;
    if bookings.is_empty() {
        writeln!(out, "You have no bookings yet.")?;
        return Ok(());
    }
    for booking in &bookings {
        write_booking(out, booking)?;
    }
    Ok(())
}

pub fn handle_cancel<S, W>(store: &BookingStore<S>, id: i64, out: &mut W) -> Result<()>
where
    S: Storage,
    W: Write,
{
    if store.remove(id)? {
        writeln!(out, "Cancelled booking {}", id)?;
    } else {
        writeln!(out, "No booking with id {}", id)?;
    }
    Ok(())
}

fn write_booking<W: Write>(out: &mut W, booking: &Booking) -> Result<()> {
    let center = &booking.center;
    writeln!(out)?;
    writeln!(out, "[{}] {}", booking.id, center.hospital_name)?;

    let details = [
        ("Address", center.address.as_str()),
        ("City", center.city.as_str()),
        ("State", center.state.as_str()),
        ("ZIP Code", center.zip_code.as_str()),
        ("Date", booking.formatted_date.as_str()),
        ("Time", booking.time.as_str()),
    ];
    for (label, value) in details {
        if !value.is_empty() {
            writeln!(out, "    {}: {}", label, value)?;
        }
    }
    Ok(())
}
