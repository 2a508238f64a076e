use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about = "Analyse and search a hotel booking dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Headline statistics: totals, average stay and rate, cancellations
    Stats(DatasetArgs),
    /// Combined seasonality, family, parking/geography and meal report
    Analysis(DatasetArgs),
    /// Most and least popular arrival and booking months
    Seasonality(DatasetArgs),
    /// Guest make-up of non-cancelled bookings
    Families(DatasetArgs),
    /// Parking-space share and top countries of non-cancelled bookings
    Parking(DatasetArgs),
    /// Booking counts per meal package
    Meals(DatasetArgs),
    /// The single most popular meal package
    PopularMeal(DatasetArgs),
    /// Up to five bookings from a given country
    Nationality(NationalityArgs),
    /// Average length of stay per booking year and hotel
    AvgStay(DatasetArgs),
    /// Total revenue per booking month and hotel
    Revenue(DatasetArgs),
    /// The five countries with the most bookings
    TopCountries(DatasetArgs),
    /// Percentage of bookings made by repeat guests
    RepeatGuests(DatasetArgs),
    /// Total guests per booking year
    GuestsByYear(DatasetArgs),
    /// Average daily rate per booking month for the resort hotel (protected)
    AvgRateResort(ProtectedArgs),
    /// Most common arrival weekday for the city hotel (protected)
    ArrivalDayCity(ProtectedArgs),
    /// Booking counts per meal package and hotel (protected)
    MealByHotel(ProtectedArgs),
    /// Resort hotel revenue per country (protected)
    RevenueResortCountry(ProtectedArgs),
    /// Booking counts per hotel and repeat-guest status (protected)
    RepeatByHotel(ProtectedArgs),
    /// Build the record store from the dataset
    Seed(SeedArgs),
    /// List the first 50 stored bookings
    Bookings(StoreArgs),
    /// Search stored bookings by guest name, booking date, or length of stay
    Search(SearchArgs),
    /// Show a stored booking by id
    Get(GetArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Booking dataset to analyse
    #[arg(
        short = 'i',
        long = "data",
        env = "HOTEL_BOOKINGS_DATA",
        default_value = "hotel_booking_data.csv"
    )]
    pub data: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the dataset (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// Login for protected reports
    #[arg(long, env = "HOTEL_BOOKINGS_USER")]
    pub user: Option<String>,
    /// Password for protected reports
    #[arg(long, env = "HOTEL_BOOKINGS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ProtectedArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Clone, Args)]
pub struct NationalityArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Two or three letter country code (ISO 3166-1)
    #[arg(short = 'c', long)]
    pub country: String,
}

#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Record store file
    #[arg(
        short = 's',
        long = "store",
        env = "HOTEL_BOOKINGS_STORE",
        default_value = "hotel_bookings_store.csv"
    )]
    pub store: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Record store file to create or replace
    #[arg(
        short = 's',
        long = "store",
        env = "HOTEL_BOOKINGS_STORE",
        default_value = "hotel_bookings_store.csv"
    )]
    pub store: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Case-insensitive part of the guest name
    #[arg(long = "guest-name")]
    pub guest_name: Option<String>,
    /// Exact booking date (YYYY-MM-DD)
    #[arg(long = "booking-date")]
    pub booking_date: Option<String>,
    /// Exact length of stay in nights
    #[arg(long = "length-of-stay", allow_negative_numbers = true)]
    pub length_of_stay: Option<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Booking id
    #[arg(long)]
    pub id: u64,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
