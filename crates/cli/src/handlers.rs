use std::io::Write;

use eyre::Result;
use tracing::info;

use medfind_client::{DirectoryClient, cities_or_empty, states_or_empty};
use medfind_store::{BookingStore, Storage};

use crate::commands::Command;

pub mod bookings;
pub mod search;

/// Executes commands against a directory and a booking store, writing
/// human-readable output to `out`.
pub struct Handler<D, S> {
    directory: D,
    store: BookingStore<S>,
}

impl<D, S> Handler<D, S>
where
    D: DirectoryClient,
    S: Storage,
{
    pub fn new(directory: D, store: BookingStore<S>) -> Self {
        Self { directory, store }
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    pub async fn handle<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        info!(?command, "handling command");

        match command {
            Command::States => {
                let states = states_or_empty(&self.directory).await;
                write_list(out, &states, "No states available")
            }
            Command::Cities { state } => {
                let cities = cities_or_empty(&self.directory, &state).await;
                write_list(out, &cities, "No cities available")
            }
            Command::Search { state, city } => {
                search::handle_search(&self.directory, &state, &city, out).await
            }
            Command::Slots => bookings::handle_slots(out),
            Command::Book(args) => {
                bookings::handle_book(&self.directory, &self.store, args, out).await
            }
            Command::Bookings => bookings::handle_list(&self.store, out),
            Command::Cancel { id } => bookings::handle_cancel(&self.store, id, out),
        }
    }
}

fn write_list<W: Write>(out: &mut W, items: &[String], empty: &str) -> Result<()> {
    if items.is_empty() {
        writeln!(out, "{}", empty)?;
    }
    for item in items {
        writeln!(out, "{}", item)?;
    }
    Ok(())
}
