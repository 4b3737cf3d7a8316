use async_trait::async_trait;
use chrono::Local;
use pretty_assertions::assert_eq;
use medfind_cli::{
    commands::{BookArgs, Command},
    handlers::Handler,
};
use medfind_client::DirectoryClient;
use medfind_core::{
    errors::{FinderError, FinderResult},
    models::center::Center,
    picker::{format_date, to_iso_timestamp},
};
use medfind_store::{BookingStore, FileStorage, MemoryStorage};

/// Canned directory with two states.
struct StaticDirectory {
    fail: bool,
}

fn center(name: &str, city: &str) -> Center {
    Center {
        hospital_name: name.to_string(),
        address: "1 MAIN ST".to_string(),
        city: city.to_uppercase(),
        state: "CA".to_string(),
        zip_code: "90001".to_string(),
        overall_rating: None,
        ..Default::default()
    }
}

#[async_trait]
impl DirectoryClient for StaticDirectory {
    async fn list_states(&self) -> FinderResult<Vec<String>> {
        if self.fail {
            return Err(FinderError::Network("connection refused".into()));
        }
        Ok(vec!["Alabama".into(), "California".into()])
    }

    async fn list_cities(&self, state: &str) -> FinderResult<Vec<String>> {
        if self.fail {
            return Err(FinderError::Network("connection refused".into()));
        }
        Ok(match state {
            "California" => vec!["Fresno".into(), "Los Angeles".into()],
            "Alabama" => vec!["Dothan".into()],
            _ => vec![],
        })
    }

    async fn list_centers(&self, state: &str, city: &str) -> FinderResult<Vec<Center>> {
        if self.fail {
            return Err(FinderError::Parse("expected value".into()));
        }
        Ok(match (state, city) {
            ("California", "Los Angeles") => vec![
                center("CEDARS-SINAI MEDICAL CENTER", city),
                center("LAC+USC MEDICAL CENTER", city),
            ],
            _ => vec![],
        })
    }
}

fn handler() -> Handler<StaticDirectory, MemoryStorage> {
    Handler::new(
        StaticDirectory { fail: false },
        BookingStore::new(MemoryStorage::new()),
    )
}

async fn run(handler: &Handler<StaticDirectory, MemoryStorage>, command: Command) -> eyre::Result<String> {
    let mut out = Vec::new();
    handler.handle(command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn book_args(center: usize, day: usize, time: Option<&str>) -> BookArgs {
    BookArgs {
        state: "California".into(),
        city: "Los Angeles".into(),
        center,
        day,
        time: time.map(str::to_string),
    }
}

#[tokio::test]
async fn test_states_and_cities() {
    let handler = handler();

    let states = run(&handler, Command::States).await.unwrap();
    assert_eq!(states, "Alabama\nCalifornia\n");

    let cities = run(&handler, Command::Cities { state: "California".into() }).await.unwrap();
    assert_eq!(cities, "Fresno\nLos Angeles\n");
}

#[tokio::test]
async fn test_directory_failure_prints_empty_message() {
    let handler = Handler::new(
        StaticDirectory { fail: true },
        BookingStore::new(MemoryStorage::new()),
    );

    let output = run(&handler, Command::States).await.unwrap();

    assert_eq!(output, "No states available\n");
}

#[tokio::test]
async fn test_search_encodes_route_and_lists_centers() {
    let handler = handler();

    let output = run(
        &handler,
        Command::Search {
            state: "California".into(),
            city: "Los Angeles".into(),
        },
    )
    .await
    .unwrap();

    assert!(output.starts_with("Searching /search?state=California&city=Los%20Angeles\n"));
    assert!(output.contains("2 medical centers available in los angeles"));
    assert!(output.contains("[0] CEDARS-SINAI MEDICAL CENTER"));
    assert!(output.contains("[1] LAC+USC MEDICAL CENTER"));
    assert!(output.contains("Overall Rating: N/A"));
}

#[tokio::test]
async fn test_search_rejects_unknown_city() {
    let handler = handler();

    let result = run(
        &handler,
        Command::Search {
            state: "Alabama".into(),
            city: "Los Angeles".into(),
        },
    )
    .await;

    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<FinderError>(),
        Some(FinderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_book_then_list_and_cancel() {
    let handler = handler();

    let output = run(&handler, Command::Book(book_args(1, 2, Some("15:00"))))
        .await
        .unwrap();

    let bookings = handler.store().list().unwrap();
    assert_eq!(bookings.len(), 1);
    let booking = &bookings[0];
    let expected_day = Local::now().date_naive() + chrono::Days::new(2);
    assert_eq!(booking.center.hospital_name, "LAC+USC MEDICAL CENTER");
    assert_eq!(booking.date, to_iso_timestamp(expected_day));
    assert_eq!(booking.formatted_date, format_date(expected_day));
    assert_eq!(booking.time, "15:00");

    assert!(output.contains("Booked LAC+USC MEDICAL CENTER"));
    assert!(output.contains("Redirecting to /my-bookings"));
    assert!(output.contains("Time: 15:00"));

    let listed = run(&handler, Command::Bookings).await.unwrap();
    assert!(listed.contains(&format!("[{}] LAC+USC MEDICAL CENTER", booking.id)));

    let cancelled = run(&handler, Command::Cancel { id: booking.id }).await.unwrap();
    assert_eq!(cancelled, format!("Cancelled booking {}\n", booking.id));
    assert!(handler.store().list().unwrap().is_empty());

    let listed = run(&handler, Command::Bookings).await.unwrap();
    assert!(listed.contains("You have no bookings yet."));
}

#[tokio::test]
async fn test_book_without_time_is_rejected() {
    let handler = handler();

    let error = run(&handler, Command::Book(book_args(0, 0, None)))
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<FinderError>(),
        Some(FinderError::Validation(_))
    ));
    assert!(handler.store().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_book_rejects_out_of_range_center_and_day() {
    let handler = handler();

    let error = run(&handler, Command::Book(book_args(5, 0, Some("09:00"))))
        .await
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<FinderError>(),
        Some(FinderError::NotFound(_))
    ));

    let error = run(&handler, Command::Book(book_args(0, 7, Some("09:00"))))
        .await
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<FinderError>(),
        Some(FinderError::Validation(_))
    ));
    assert!(handler.store().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_slots_lists_window_and_groups() {
    let handler = handler();

    let output = run(&handler, Command::Slots).await.unwrap();

    assert!(output.contains("(Today)"));
    assert!(output.contains("  6: "));
    assert!(output.contains("Morning: 09:00 10:00 11:00"));
    assert!(output.contains("Afternoon: 12:00 13:00 14:00 15:00"));
    assert!(output.contains("Evening: 16:00 17:00 18:00"));
}

#[tokio::test]
async fn test_bookings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = Handler::new(
        StaticDirectory { fail: false },
        BookingStore::new(FileStorage::open(dir.path()).unwrap()),
    );
    let mut out = Vec::new();
    first
        .handle(Command::Book(book_args(0, 0, Some("09:00"))), &mut out)
        .await
        .unwrap();

    let second = Handler::new(
        StaticDirectory { fail: false },
        BookingStore::new(FileStorage::open(dir.path()).unwrap()),
    );
    let mut out = Vec::new();
    second.handle(Command::Bookings, &mut out).await.unwrap();
    let listed = String::from_utf8(out).unwrap();

    assert!(listed.contains("CEDARS-SINAI MEDICAL CENTER"));
    assert!(listed.contains("Time: 09:00"));
}

#[tokio::test]
async fn test_cancel_unknown_id_reports_nothing_removed() {
    let handler = handler();
    run(&handler, Command::Book(book_args(0, 0, Some("11:00"))))
        .await
        .unwrap();

    let output = run(&handler, Command::Cancel { id: 42 }).await.unwrap();

    assert_eq!(output, "No booking with id 42\n");
    assert_eq!(handler.store().list().unwrap().len(), 1);
}
