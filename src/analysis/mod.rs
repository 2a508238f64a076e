//! Read-only reports over an in-memory booking table.
//!
//! Every report takes the full table as `&[Booking]` and applies its own
//! filter. Cancelled bookings are left out unless a report explicitly covers
//! the whole table (`total_stats`, `seasonality_analysis`, `meal_popularity`,
//! `repeat_guest_rate`, `country_lookup`). Grouped reports return an empty
//! list when nothing qualifies; single-value reports whose measure is a mean,
//! a ratio, or a mode fail with a data error instead.

mod grouped;
mod overview;

use serde::Serialize;

use crate::{booking::Booking, frequency::FrequencyCounter};

pub use grouped::{
    ArrivalDay, AvgStay, CountryRevenue, GuestsByYear, HotelMealCount, HotelRepeatCount,
    MonthlyRate, MonthlyRevenue, avg_rate_resort_by_month, avg_stay_by_year_hotel,
    common_arrival_day_city, count_by_hotel_meal, count_by_hotel_repeat_guest, guests_by_year,
    revenue_by_month_hotel, revenue_resort_by_country, top_countries,
};
pub use overview::{
    BookingAnalysis, FamilyComposition, MealCount, MealPopularity, ParkingAndGeo, PopularMeal,
    RepeatGuestRate, Seasonality, TotalStats, booking_analysis, country_lookup,
    family_composition, meal_popularity, most_popular_meal, normalize_country_code,
    parking_and_geo, repeat_guest_rate, seasonality_analysis, total_stats,
};

pub const TOP_COUNTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count_of_bookings: usize,
}

impl From<(&str, usize)> for CountryCount {
    fn from((country, count_of_bookings): (&str, usize)) -> Self {
        Self {
            country: country.to_string(),
            count_of_bookings,
        }
    }
}

fn active_bookings(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings.iter().filter(|b| b.is_active())
}

fn active_at_hotel<'a>(
    bookings: &'a [Booking],
    hotel: &'a str,
) -> impl Iterator<Item = &'a Booking> + 'a {
    active_bookings(bookings).filter(move |b| b.hotel == hotel)
}

/// Non-cancelled bookings per country; bookings without a country are
/// skipped.
fn country_counts(bookings: &[Booking]) -> FrequencyCounter<&str> {
    active_bookings(bookings)
        .filter_map(|b| b.country.as_deref())
        .collect()
}
