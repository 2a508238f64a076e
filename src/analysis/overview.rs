//! Whole-table summaries: headline statistics, seasonality, guest make-up,
//! parking and geography, meal packages, and nationality lookups.

use serde::Serialize;

use crate::{
    booking::Booking,
    derive::{self, CalendarMonth},
    error::{BookingError, BookingResult},
    frequency::FrequencyCounter,
    stats::{MeanAccumulator, percentage},
};

use super::{CountryCount, TOP_COUNTRIES, active_bookings, country_counts};

const COUNTRY_LOOKUP_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalStats {
    pub total_number_of_bookings: usize,
    pub average_length_of_stay: f64,
    pub average_daily_rate: f64,
    pub number_of_cancelled_bookings: usize,
    pub number_of_non_cancelled_bookings: usize,
    pub most_popular_market_segment: String,
}

pub fn total_stats(bookings: &[Booking]) -> BookingResult<TotalStats> {
    let stays: MeanAccumulator = bookings
        .iter()
        .map(|b| b.length_of_stay() as f64)
        .collect();
    let rates: MeanAccumulator = bookings.iter().map(|b| b.adr).collect();
    let cancelled = bookings.iter().filter(|b| b.is_canceled).count();
    let segments: FrequencyCounter<&str> =
        bookings.iter().map(|b| b.market_segment.as_str()).collect();
    let (segment, _) = segments
        .most_common()
        .ok_or_else(|| BookingError::data("Cannot rank market segments without bookings"))?;

    Ok(TotalStats {
        total_number_of_bookings: bookings.len(),
        average_length_of_stay: stays.rounded_mean("length of stay")?,
        average_daily_rate: rates.rounded_mean("daily rate")?,
        number_of_cancelled_bookings: cancelled,
        number_of_non_cancelled_bookings: bookings.len() - cancelled,
        most_popular_market_segment: segment.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seasonality {
    pub most_popular_arrival_month: CalendarMonth,
    pub least_popular_arrival_month: CalendarMonth,
    pub most_popular_booking_month: CalendarMonth,
    pub least_popular_booking_month: CalendarMonth,
}

/// Most and least frequent arrival and booking months across all bookings.
///
/// The least popular month is the one with the lowest count; among equal
/// counts it is the month whose first booking appears latest in the table.
pub fn seasonality_analysis(bookings: &[Booking]) -> BookingResult<Seasonality> {
    let derived = derive::derive_all(bookings)?;
    let arrivals: FrequencyCounter<CalendarMonth> =
        derived.iter().map(|d| d.arrival_month()).collect();
    let booked: FrequencyCounter<CalendarMonth> =
        derived.iter().map(|d| d.booking_month()).collect();

    let empty = || BookingError::data("Cannot rank months without bookings");
    Ok(Seasonality {
        most_popular_arrival_month: arrivals.most_common().ok_or_else(empty)?.0,
        least_popular_arrival_month: arrivals.least_common().ok_or_else(empty)?.0,
        most_popular_booking_month: booked.most_common().ok_or_else(empty)?.0,
        least_popular_booking_month: booked.least_common().ok_or_else(empty)?.0,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FamilyComposition {
    pub guests_without_children: usize,
    pub guests_with_children_or_babies: usize,
    pub solo_guests: usize,
    pub couples_without_children: usize,
}

pub fn family_composition(bookings: &[Booking]) -> FamilyComposition {
    active_bookings(bookings).fold(FamilyComposition::default(), |mut acc, b| {
        if b.has_children_or_babies() {
            acc.guests_with_children_or_babies += 1;
        } else {
            acc.guests_without_children += 1;
            match b.adults {
                1 => acc.solo_guests += 1,
                2 => acc.couples_without_children += 1,
                _ => {}
            }
        }
        acc
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingAndGeo {
    pub parking_space_percentage: f64,
    pub top_countries: Vec<CountryCount>,
}

pub fn parking_and_geo(bookings: &[Booking]) -> BookingResult<ParkingAndGeo> {
    let (total, with_parking) = active_bookings(bookings).fold((0usize, 0usize), |acc, b| {
        (acc.0 + 1, acc.1 + usize::from(b.required_car_parking_spaces > 0))
    });
    Ok(ParkingAndGeo {
        parking_space_percentage: percentage(with_parking, total, "parking share")?,
        top_countries: country_counts(bookings)
            .top(TOP_COUNTRIES)
            .into_iter()
            .map(CountryCount::from)
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealCount {
    pub meal: String,
    pub counts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPopularity {
    pub most_popular_meal: String,
    pub meal_counts: Vec<MealCount>,
}

pub fn meal_popularity(bookings: &[Booking]) -> BookingResult<MealPopularity> {
    let meals: FrequencyCounter<&str> = bookings.iter().map(|b| b.meal.as_str()).collect();
    let meal_counts: Vec<MealCount> = meals
        .ranked()
        .into_iter()
        .map(|(meal, counts)| MealCount {
            meal: meal.to_string(),
            counts,
        })
        .collect();
    let most_popular_meal = meal_counts
        .first()
        .map(|m| m.meal.clone())
        .ok_or_else(|| BookingError::data("Cannot rank meal packages without bookings"))?;
    Ok(MealPopularity {
        most_popular_meal,
        meal_counts,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularMeal {
    pub most_popular_meal: String,
}

pub fn most_popular_meal(bookings: &[Booking]) -> BookingResult<PopularMeal> {
    meal_popularity(bookings).map(|report| PopularMeal {
        most_popular_meal: report.most_popular_meal,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingAnalysis {
    #[serde(flatten)]
    pub seasonality: Seasonality,
    #[serde(flatten)]
    pub families: FamilyComposition,
    pub parking_space_percentage: f64,
    pub most_popular_countries: Vec<CountryCount>,
    pub meal_packages: Vec<MealCount>,
}

/// Seasonality, family make-up, parking/geography and meal packages in one
/// report.
pub fn booking_analysis(bookings: &[Booking]) -> BookingResult<BookingAnalysis> {
    let seasonality = seasonality_analysis(bookings)?;
    let families = family_composition(bookings);
    let parking = parking_and_geo(bookings)?;
    let meals = meal_popularity(bookings)?;
    Ok(BookingAnalysis {
        seasonality,
        families,
        parking_space_percentage: parking.parking_space_percentage,
        most_popular_countries: parking.top_countries,
        meal_packages: meals.meal_counts,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatGuestRate {
    pub repeated_guests_percentage: f64,
}

pub fn repeat_guest_rate(bookings: &[Booking]) -> BookingResult<RepeatGuestRate> {
    let repeated = bookings.iter().filter(|b| b.is_repeated_guest).count();
    Ok(RepeatGuestRate {
        repeated_guests_percentage: percentage(repeated, bookings.len(), "repeat-guest rate")?,
    })
}

/// Validates a 2–3 letter country code and returns it upper-cased.
pub fn normalize_country_code(code: &str) -> BookingResult<String> {
    let trimmed = code.trim();
    if !(2..=3).contains(&trimmed.len()) {
        return Err(BookingError::bad_request(format!(
            "Country code '{trimmed}' must be 2 or 3 letters long"
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(BookingError::bad_request(format!(
            "Country code '{trimmed}' must contain only letters"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Up to five bookings from `country`, in table order.
pub fn country_lookup<'a>(bookings: &'a [Booking], country: &str) -> BookingResult<Vec<&'a Booking>> {
    let code = normalize_country_code(country)?;
    let matches: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.country.as_deref() == Some(code.as_str()))
        .take(COUNTRY_LOOKUP_LIMIT)
        .collect();
    if matches.is_empty() {
        return Err(BookingError::not_found(format!(
            "No bookings found for country {code}"
        )));
    }
    Ok(matches)
}
