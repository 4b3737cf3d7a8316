use clap::{Args, Parser, Subcommand};

/// Find medical centers and book appointments.
#[derive(Debug, Parser)]
#[command(name = "medfind", version, about = "Find medical centers and book appointments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override MEDFIND_API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Override MEDFIND_DATA_DIR
    #[arg(long, global = true)]
    pub data_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the states known to the directory
    States,
    /// List the cities of a state
    Cities { state: String },
    /// Search for medical centers in a city
    Search { state: String, city: String },
    /// Show the bookable dates and time slots
    Slots,
    /// Book an appointment at a center from the search results
    Book(BookArgs),
    /// List your bookings
    Bookings,
    /// Cancel a booking
    Cancel { id: i64 },
}

#[derive(Debug, Args)]
pub struct BookArgs {
    pub state: String,
    pub city: String,

    /// Position of the center in the search results
    #[arg(long)]
    pub center: usize,

    /// Days from today, 0 to 6
    #[arg(long, default_value_t = 0)]
    pub day: usize,

    /// Time slot, e.g. 10:00
    #[arg(long)]
    pub time: Option<String>,
}
