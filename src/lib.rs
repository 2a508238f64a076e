pub mod analysis;
pub mod auth;
pub mod booking;
pub mod cli;
pub mod dataset;
pub mod derive;
pub mod error;
pub mod frequency;
pub mod io_utils;
pub mod report;
pub mod stats;
pub mod store;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    auth::Credentials,
    booking::Booking,
    cli::{Cli, Commands, CredentialArgs, DatasetArgs, ProtectedArgs},
    dataset::LoadOptions,
    report::{emit, emit_one},
    store::{RecordStore, SearchCriteria},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("hotel_bookings", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Stats(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::total_stats(&bookings)?, args.format)
        }
        Commands::Analysis(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::booking_analysis(&bookings)?, args.format)
        }
        Commands::Seasonality(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::seasonality_analysis(&bookings)?, args.format)
        }
        Commands::Families(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::family_composition(&bookings), args.format)
        }
        Commands::Parking(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::parking_and_geo(&bookings)?, args.format)
        }
        Commands::Meals(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::meal_popularity(&bookings)?, args.format)
        }
        Commands::PopularMeal(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::most_popular_meal(&bookings)?, args.format)
        }
        Commands::Nationality(args) => handle_nationality(&args),
        Commands::AvgStay(args) => {
            let bookings = load(&args)?;
            emit(&analysis::avg_stay_by_year_hotel(&bookings)?, args.format)
        }
        Commands::Revenue(args) => {
            let bookings = load(&args)?;
            emit(&analysis::revenue_by_month_hotel(&bookings)?, args.format)
        }
        Commands::TopCountries(args) => {
            let bookings = load(&args)?;
            emit(&analysis::top_countries(&bookings), args.format)
        }
        Commands::RepeatGuests(args) => {
            let bookings = load(&args)?;
            emit_one(&analysis::repeat_guest_rate(&bookings)?, args.format)
        }
        Commands::GuestsByYear(args) => {
            let bookings = load(&args)?;
            emit(&analysis::guests_by_year(&bookings)?, args.format)
        }
        Commands::AvgRateResort(args) => {
            let bookings = load_protected(&args)?;
            emit(
                &analysis::avg_rate_resort_by_month(&bookings)?,
                args.dataset.format,
            )
        }
        Commands::ArrivalDayCity(args) => {
            let bookings = load_protected(&args)?;
            emit(
                &analysis::common_arrival_day_city(&bookings)?,
                args.dataset.format,
            )
        }
        Commands::MealByHotel(args) => {
            let bookings = load_protected(&args)?;
            emit(&analysis::count_by_hotel_meal(&bookings), args.dataset.format)
        }
        Commands::RevenueResortCountry(args) => {
            let bookings = load_protected(&args)?;
            emit(
                &analysis::revenue_resort_by_country(&bookings),
                args.dataset.format,
            )
        }
        Commands::RepeatByHotel(args) => {
            let bookings = load_protected(&args)?;
            emit(
                &analysis::count_by_hotel_repeat_guest(&bookings),
                args.dataset.format,
            )
        }
        Commands::Seed(args) => handle_seed(&args),
        Commands::Bookings(args) => {
            let store = open_store(&args.store)?;
            emit(&store.list(), args.format)
        }
        Commands::Search(args) => handle_search(&args),
        Commands::Get(args) => {
            let store = open_store(&args.store.store)?;
            emit_one(store.get(args.id)?, args.store.format)
        }
    }
}

fn load(args: &DatasetArgs) -> Result<Vec<Booking>> {
    let delimiter = io_utils::resolve_input_delimiter(&args.data, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Loading bookings from '{}' with delimiter '{}'",
        args.data.display(),
        printable_delimiter(delimiter)
    );
    dataset::load_bookings(&args.data, LoadOptions { delimiter, encoding })
        .with_context(|| format!("Loading booking dataset {:?}", args.data))
}

/// Checks the supplied login before touching the dataset.
fn load_protected(args: &ProtectedArgs) -> Result<Vec<Booking>> {
    let expected = Credentials::from_env()?;
    auth::verify(&expected, supplied_credentials(&args.credentials).as_ref())?;
    debug!("Credentials accepted for protected report");
    load(&args.dataset)
}

fn supplied_credentials(args: &CredentialArgs) -> Option<Credentials> {
    match (&args.user, &args.password) {
        (Some(user), Some(password)) => Some(Credentials::new(user.as_str(), password.as_str())),
        _ => None,
    }
}

fn handle_nationality(args: &cli::NationalityArgs) -> Result<()> {
    let country = analysis::normalize_country_code(&args.country)?;
    let bookings = load(&args.dataset)?;
    let found = analysis::country_lookup(&bookings, &country)?;
    info!("Found {} booking(s) from {}", found.len(), country);
    emit(&found, args.dataset.format)
}

fn handle_seed(args: &cli::SeedArgs) -> Result<()> {
    let bookings = load(&args.dataset)?;
    let store = RecordStore::from_bookings(&bookings)
        .with_context(|| format!("Building record store from {:?}", args.dataset.data))?;
    store
        .save(&args.store)
        .with_context(|| format!("Writing record store to {:?}", args.store))?;
    info!(
        "Seeded {} booking(s) into {:?}",
        store.len(),
        args.store
    );
    Ok(())
}

fn handle_search(args: &cli::SearchArgs) -> Result<()> {
    let criteria = SearchCriteria {
        guest_name: args.guest_name.clone(),
        booking_date: args.booking_date.clone(),
        length_of_stay: args.length_of_stay,
    };
    let store = open_store(&args.store.store)?;
    let found = store.search(&criteria)?;
    info!("Search matched {} booking(s)", found.len());
    emit(&found, args.store.format)
}

fn open_store(path: &std::path::Path) -> Result<RecordStore> {
    RecordStore::load(path).with_context(|| {
        format!("Loading record store {path:?}; run `hotel-bookings seed` first")
    })
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
