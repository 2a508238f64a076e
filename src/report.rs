//! Renders report results as an aligned table, JSON, or CSV.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::{
    analysis::{
        ArrivalDay, AvgStay, BookingAnalysis, CountryCount, CountryRevenue, FamilyComposition,
        GuestsByYear, HotelMealCount, HotelRepeatCount, MealCount, MealPopularity, MonthlyRate,
        MonthlyRevenue, ParkingAndGeo, PopularMeal, RepeatGuestRate, Seasonality, TotalStats,
    },
    booking::Booking,
    io_utils,
    store::StoredBooking,
    table::{self, TableRow},
};

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Writes `rows` to stdout in the requested format.
pub fn emit<T>(rows: &[T], format: OutputFormat) -> Result<()>
where
    T: TableRow + Serialize,
{
    match format {
        OutputFormat::Table => {
            let mut out = std::io::stdout().lock();
            write!(out, "{}", table::render_rows(rows)).context("Writing table output")?;
        }
        OutputFormat::Json => {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, rows).context("Writing JSON output")?;
            writeln!(out).context("Writing JSON output")?;
        }
        OutputFormat::Csv => {
            let mut writer = io_utils::open_csv_writer(None, io_utils::DEFAULT_CSV_DELIMITER)?;
            writer
                .write_record(T::headers())
                .context("Writing CSV header")?;
            for row in rows {
                writer.write_record(row.cells()).context("Writing CSV row")?;
            }
            writer.flush().context("Flushing CSV output")?;
        }
    }
    Ok(())
}

pub fn emit_one<T>(row: &T, format: OutputFormat) -> Result<()>
where
    T: TableRow + Serialize,
{
    emit(std::slice::from_ref(row), format)
}

fn number(value: f64) -> String {
    format!("{value:.2}")
}

fn joined<I>(pairs: I) -> String
where
    I: IntoIterator<Item = (String, usize)>,
{
    pairs
        .into_iter()
        .map(|(label, count)| format!("{label}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl TableRow for TotalStats {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_number_of_bookings",
            "average_length_of_stay",
            "average_daily_rate",
            "number_of_cancelled_bookings",
            "number_of_non_cancelled_bookings",
            "most_popular_market_segment",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.total_number_of_bookings.to_string(),
            number(self.average_length_of_stay),
            number(self.average_daily_rate),
            self.number_of_cancelled_bookings.to_string(),
            self.number_of_non_cancelled_bookings.to_string(),
            self.most_popular_market_segment.clone(),
        ]
    }
}

impl TableRow for Seasonality {
    fn headers() -> Vec<&'static str> {
        vec![
            "most_popular_arrival_month",
            "least_popular_arrival_month",
            "most_popular_booking_month",
            "least_popular_booking_month",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.most_popular_arrival_month.to_string(),
            self.least_popular_arrival_month.to_string(),
            self.most_popular_booking_month.to_string(),
            self.least_popular_booking_month.to_string(),
        ]
    }
}

impl TableRow for FamilyComposition {
    fn headers() -> Vec<&'static str> {
        vec![
            "guests_without_children",
            "guests_with_children_or_babies",
            "solo_guests",
            "couples_without_children",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.guests_without_children.to_string(),
            self.guests_with_children_or_babies.to_string(),
            self.solo_guests.to_string(),
            self.couples_without_children.to_string(),
        ]
    }
}

impl TableRow for ParkingAndGeo {
    fn headers() -> Vec<&'static str> {
        vec!["parking_space_percentage", "top_countries"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            number(self.parking_space_percentage),
            joined(
                self.top_countries
                    .iter()
                    .map(|c| (c.country.clone(), c.count_of_bookings)),
            ),
        ]
    }
}

impl TableRow for MealPopularity {
    fn headers() -> Vec<&'static str> {
        vec!["most_popular_meal", "meal_counts"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.most_popular_meal.clone(),
            joined(self.meal_counts.iter().map(|m| (m.meal.clone(), m.counts))),
        ]
    }
}

impl TableRow for PopularMeal {
    fn headers() -> Vec<&'static str> {
        vec!["most_popular_meal"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.most_popular_meal.clone()]
    }
}

impl TableRow for BookingAnalysis {
    fn headers() -> Vec<&'static str> {
        let mut headers = Seasonality::headers();
        headers.extend(FamilyComposition::headers());
        headers.extend([
            "parking_space_percentage",
            "most_popular_countries",
            "meal_packages",
        ]);
        headers
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = self.seasonality.cells();
        cells.extend(self.families.cells());
        cells.push(number(self.parking_space_percentage));
        cells.push(joined(
            self.most_popular_countries
                .iter()
                .map(|c| (c.country.clone(), c.count_of_bookings)),
        ));
        cells.push(joined(
            self.meal_packages.iter().map(|m| (m.meal.clone(), m.counts)),
        ));
        cells
    }
}

impl TableRow for MealCount {
    fn headers() -> Vec<&'static str> {
        vec!["meal", "counts"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.meal.clone(), self.counts.to_string()]
    }
}

impl TableRow for CountryCount {
    fn headers() -> Vec<&'static str> {
        vec!["country", "count_of_bookings"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.country.clone(), self.count_of_bookings.to_string()]
    }
}

impl TableRow for RepeatGuestRate {
    fn headers() -> Vec<&'static str> {
        vec!["repeated_guests_percentage"]
    }

    fn cells(&self) -> Vec<String> {
        vec![number(self.repeated_guests_percentage)]
    }
}

impl TableRow for AvgStay {
    fn headers() -> Vec<&'static str> {
        vec!["year", "hotel", "avg_length_of_stay"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.hotel.clone(),
            number(self.avg_length_of_stay),
        ]
    }
}

impl TableRow for MonthlyRevenue {
    fn headers() -> Vec<&'static str> {
        vec!["month", "hotel", "total_revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.month.to_string(),
            self.hotel.clone(),
            number(self.total_revenue),
        ]
    }
}

impl TableRow for GuestsByYear {
    fn headers() -> Vec<&'static str> {
        vec!["year", "count_guests"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.to_string(), self.count_guests.to_string()]
    }
}

impl TableRow for MonthlyRate {
    fn headers() -> Vec<&'static str> {
        vec!["month", "avg_daily_rate"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.month.to_string(), number(self.avg_daily_rate)]
    }
}

impl TableRow for ArrivalDay {
    fn headers() -> Vec<&'static str> {
        vec!["day_of_the_week", "counts_of_arrivals"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.day_of_the_week.clone(),
            self.counts_of_arrivals.to_string(),
        ]
    }
}

impl TableRow for HotelMealCount {
    fn headers() -> Vec<&'static str> {
        vec!["hotel", "meal", "counts"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.hotel.clone(), self.meal.clone(), self.counts.to_string()]
    }
}

impl TableRow for CountryRevenue {
    fn headers() -> Vec<&'static str> {
        vec!["country", "total_revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.country.clone(), number(self.total_revenue)]
    }
}

impl TableRow for HotelRepeatCount {
    fn headers() -> Vec<&'static str> {
        vec!["hotel", "is_repeated_guest", "count_guests"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.hotel.clone(),
            self.is_repeated_guest.to_string(),
            self.count_guests.to_string(),
        ]
    }
}

impl TableRow for StoredBooking {
    fn headers() -> Vec<&'static str> {
        vec!["id", "booking_date", "length_of_stay", "guest_name", "daily_rate"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.booking_date.format("%Y-%m-%d").to_string(),
            self.length_of_stay.to_string(),
            self.guest_name.clone(),
            number(self.daily_rate),
        ]
    }
}

/// Nationality lookups show the identifying columns; JSON output carries the
/// full record.
impl TableRow for Booking {
    fn headers() -> Vec<&'static str> {
        vec![
            "hotel",
            "is_canceled",
            "arrival_date",
            "nights",
            "adults",
            "children",
            "babies",
            "meal",
            "country",
            "market_segment",
            "adr",
            "name",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.hotel.clone(),
            self.is_canceled.to_string(),
            format!(
                "{}-{}-{}",
                self.arrival_date_year, self.arrival_date_month, self.arrival_date_day_of_month
            ),
            self.length_of_stay().to_string(),
            self.adults.to_string(),
            optional(self.children),
            self.babies.to_string(),
            self.meal.clone(),
            optional(self.country.as_deref()),
            self.market_segment.clone(),
            number(self.adr),
            self.name.clone(),
        ]
    }
}

impl<T: TableRow> TableRow for &T {
    fn headers() -> Vec<&'static str> {
        T::headers()
    }

    fn cells(&self) -> Vec<String> {
        (**self).cells()
    }
}
