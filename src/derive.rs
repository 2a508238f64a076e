//! Derived booking fields.
//!
//! A [`DerivedBooking`] borrows a raw [`Booking`] and adds the calendar fields
//! the date-based reports group on. The raw record is never modified, so the
//! same table can be derived any number of times with identical results.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::{
    booking::Booking,
    error::{BookingError, BookingResult},
};

/// Gregorian month with January…December ordering independent of locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth(Month);

impl CalendarMonth {
    pub const ALL: [CalendarMonth; 12] = [
        CalendarMonth(Month::January),
        CalendarMonth(Month::February),
        CalendarMonth(Month::March),
        CalendarMonth(Month::April),
        CalendarMonth(Month::May),
        CalendarMonth(Month::June),
        CalendarMonth(Month::July),
        CalendarMonth(Month::August),
        CalendarMonth(Month::September),
        CalendarMonth(Month::October),
        CalendarMonth(Month::November),
        CalendarMonth(Month::December),
    ];

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Accepts full or three-letter English names (any case) or `1`..`12`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_number(number);
        }
        trimmed.parse::<Month>().ok().map(CalendarMonth)
    }

    pub fn number(self) -> u32 {
        self.0.number_from_month()
    }

    pub fn name(self) -> &'static str {
        self.0.name()
    }
}

impl Ord for CalendarMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number().cmp(&other.number())
    }
}

impl Hash for CalendarMonth {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number().hash(state);
    }
}

impl PartialOrd for CalendarMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedBooking<'a> {
    pub raw: &'a Booking,
    pub length_of_stay: u64,
    pub arrival_date: NaiveDate,
    pub booking_date: NaiveDate,
    pub revenue: f64,
}

impl DerivedBooking<'_> {
    pub fn arrival_month(&self) -> CalendarMonth {
        CalendarMonth::ALL[self.arrival_date.month0() as usize]
    }

    pub fn booking_month(&self) -> CalendarMonth {
        CalendarMonth::ALL[self.booking_date.month0() as usize]
    }

    pub fn booking_year(&self) -> i32 {
        self.booking_date.year()
    }

    pub fn arrival_weekday(&self) -> &'static str {
        weekday_name(self.arrival_date.weekday())
    }
}

pub fn arrival_date(booking: &Booking) -> BookingResult<NaiveDate> {
    let month = CalendarMonth::parse(&booking.arrival_date_month).ok_or_else(|| {
        BookingError::data(format!(
            "Unknown arrival month '{}'",
            booking.arrival_date_month
        ))
    })?;
    NaiveDate::from_ymd_opt(
        booking.arrival_date_year,
        month.number(),
        booking.arrival_date_day_of_month,
    )
    .ok_or_else(|| {
        BookingError::data(format!(
            "Invalid arrival date {}-{}-{}",
            booking.arrival_date_year, booking.arrival_date_month, booking.arrival_date_day_of_month
        ))
    })
}

pub fn booking_date(arrival: NaiveDate, lead_time: u32) -> BookingResult<NaiveDate> {
    arrival
        .checked_sub_days(Days::new(u64::from(lead_time)))
        .ok_or_else(|| {
            BookingError::data(format!(
                "Lead time of {lead_time} day(s) before {arrival} is out of range"
            ))
        })
}

pub fn derive(booking: &Booking) -> BookingResult<DerivedBooking<'_>> {
    let arrival = arrival_date(booking)?;
    Ok(DerivedBooking {
        raw: booking,
        length_of_stay: booking.length_of_stay(),
        arrival_date: arrival,
        booking_date: booking_date(arrival, booking.lead_time)?,
        revenue: booking.revenue(),
    })
}

/// Derives every record of `bookings`, failing on the first malformed date.
pub fn derive_all(bookings: &[Booking]) -> BookingResult<Vec<DerivedBooking<'_>>> {
    derive_where(bookings, |_| true)
}

/// Derives only the records accepted by `keep`, in table order. Rows that are
/// filtered out are never inspected, so a malformed date there is ignored.
pub fn derive_where<F>(bookings: &[Booking], keep: F) -> BookingResult<Vec<DerivedBooking<'_>>>
where
    F: Fn(&Booking) -> bool,
{
    bookings
        .iter()
        .enumerate()
        .filter(|(_, booking)| keep(booking))
        .map(|(idx, booking)| {
            derive(booking).map_err(|err| match err {
                BookingError::Data(message) => {
                    BookingError::data(format!("record {idx}: {message}"))
                }
                other => other,
            })
        })
        .collect()
}
