//! Grouped and ranked reports over non-cancelled bookings.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    booking::{Booking, CITY_HOTEL, RESORT_HOTEL},
    derive::{self, CalendarMonth},
    error::BookingResult,
    frequency::FrequencyCounter,
    stats::MeanAccumulator,
};

use super::{CountryCount, TOP_COUNTRIES, active_at_hotel, active_bookings, country_counts};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvgStay {
    pub year: i32,
    pub hotel: String,
    pub avg_length_of_stay: f64,
}

/// Mean stay length per booking year and hotel, years ascending then hotel
/// name.
pub fn avg_stay_by_year_hotel(bookings: &[Booking]) -> BookingResult<Vec<AvgStay>> {
    let derived = derive::derive_where(bookings, Booking::is_active)?;
    let mut groups: BTreeMap<(i32, &str), MeanAccumulator> = BTreeMap::new();
    for booking in &derived {
        groups
            .entry((booking.booking_year(), booking.raw.hotel.as_str()))
            .or_default()
            .add(booking.length_of_stay as f64);
    }
    groups
        .into_iter()
        .map(|((year, hotel), stays)| {
            Ok(AvgStay {
                year,
                hotel: hotel.to_string(),
                avg_length_of_stay: stays.rounded_mean("length of stay")?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: CalendarMonth,
    pub hotel: String,
    pub total_revenue: f64,
}

/// Revenue per booking month and hotel in January…December order. Totals are
/// the exact sums; only rendering trims them to two decimals.
pub fn revenue_by_month_hotel(bookings: &[Booking]) -> BookingResult<Vec<MonthlyRevenue>> {
    let derived = derive::derive_where(bookings, Booking::is_active)?;
    let mut groups: BTreeMap<(CalendarMonth, &str), f64> = BTreeMap::new();
    for booking in &derived {
        *groups
            .entry((booking.booking_month(), booking.raw.hotel.as_str()))
            .or_default() += booking.revenue;
    }
    Ok(groups
        .into_iter()
        .map(|((month, hotel), total_revenue)| MonthlyRevenue {
            month,
            hotel: hotel.to_string(),
            total_revenue,
        })
        .collect())
}

/// The five countries with the most non-cancelled bookings.
pub fn top_countries(bookings: &[Booking]) -> Vec<CountryCount> {
    country_counts(bookings)
        .top(TOP_COUNTRIES)
        .into_iter()
        .map(CountryCount::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestsByYear {
    pub year: i32,
    pub count_guests: u64,
}

pub fn guests_by_year(bookings: &[Booking]) -> BookingResult<Vec<GuestsByYear>> {
    let derived = derive::derive_where(bookings, Booking::is_active)?;
    let mut groups: BTreeMap<i32, u64> = BTreeMap::new();
    for booking in &derived {
        *groups.entry(booking.booking_year()).or_default() += booking.raw.total_guests();
    }
    Ok(groups
        .into_iter()
        .map(|(year, count_guests)| GuestsByYear { year, count_guests })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRate {
    pub month: CalendarMonth,
    pub avg_daily_rate: f64,
}

/// Mean daily rate of resort-hotel bookings per booking month.
pub fn avg_rate_resort_by_month(bookings: &[Booking]) -> BookingResult<Vec<MonthlyRate>> {
    let derived = derive::derive_where(bookings, |b| b.is_active() && b.hotel == RESORT_HOTEL)?;
    let mut groups: BTreeMap<CalendarMonth, MeanAccumulator> = BTreeMap::new();
    for booking in &derived {
        groups
            .entry(booking.booking_month())
            .or_default()
            .add(booking.raw.adr);
    }
    groups
        .into_iter()
        .map(|(month, rates)| {
            Ok(MonthlyRate {
                month,
                avg_daily_rate: rates.rounded_mean("daily rate")?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalDay {
    pub day_of_the_week: String,
    pub counts_of_arrivals: usize,
}

/// The weekday city-hotel guests most often arrive on, as a list of at most
/// one entry.
pub fn common_arrival_day_city(bookings: &[Booking]) -> BookingResult<Vec<ArrivalDay>> {
    let derived = derive::derive_where(bookings, |b| b.is_active() && b.hotel == CITY_HOTEL)?;
    let weekdays: FrequencyCounter<&'static str> =
        derived.iter().map(|d| d.arrival_weekday()).collect();
    Ok(weekdays
        .top(1)
        .into_iter()
        .map(|(day, counts_of_arrivals)| ArrivalDay {
            day_of_the_week: day.to_string(),
            counts_of_arrivals,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelMealCount {
    pub hotel: String,
    pub meal: String,
    pub counts: usize,
}

/// Non-cancelled bookings per meal package and hotel, ordered by meal then
/// hotel.
pub fn count_by_hotel_meal(bookings: &[Booking]) -> Vec<HotelMealCount> {
    let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for booking in active_bookings(bookings) {
        *groups
            .entry((booking.meal.as_str(), booking.hotel.as_str()))
            .or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((meal, hotel), counts)| HotelMealCount {
            hotel: hotel.to_string(),
            meal: meal.to_string(),
            counts,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRevenue {
    pub country: String,
    pub total_revenue: f64,
}

/// Resort-hotel revenue per country, highest first. Equal totals keep the
/// order in which the countries first appear.
pub fn revenue_resort_by_country(bookings: &[Booking]) -> Vec<CountryRevenue> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for booking in active_at_hotel(bookings, RESORT_HOTEL) {
        let Some(country) = booking.country.as_deref() else {
            continue;
        };
        let slot = *positions.entry(country).or_insert_with(|| {
            totals.push((country, 0.0));
            totals.len() - 1
        });
        totals[slot].1 += booking.revenue();
    }
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
        .into_iter()
        .map(|(country, total_revenue)| CountryRevenue {
            country: country.to_string(),
            total_revenue,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelRepeatCount {
    pub hotel: String,
    pub is_repeated_guest: bool,
    pub count_guests: usize,
}

pub fn count_by_hotel_repeat_guest(bookings: &[Booking]) -> Vec<HotelRepeatCount> {
    let mut groups: BTreeMap<(&str, bool), usize> = BTreeMap::new();
    for booking in active_bookings(bookings) {
        *groups
            .entry((booking.hotel.as_str(), booking.is_repeated_guest))
            .or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((hotel, is_repeated_guest), count_guests)| HotelRepeatCount {
            hotel: hotel.to_string(),
            is_repeated_guest,
            count_guests,
        })
        .collect()
}
