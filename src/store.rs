//! The booking record store: a compact per-booking table used for listing,
//! point lookups, and guest search.
//!
//! The store is seeded from the analytical dataset (one row per booking, the
//! row position becoming the id) and persisted as CSV between invocations.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    booking::Booking,
    derive,
    error::{BookingError, BookingResult},
    io_utils,
};

pub const RESULT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBooking {
    pub id: u64,
    pub booking_date: NaiveDate,
    pub length_of_stay: u64,
    pub guest_name: String,
    pub daily_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub guest_name: Option<String>,
    pub booking_date: Option<String>,
    pub length_of_stay: Option<i64>,
}

/// Criteria after validation, ready to match against records.
#[derive(Debug)]
struct ValidatedCriteria {
    guest_name: Option<String>,
    booking_date: Option<NaiveDate>,
    length_of_stay: Option<u64>,
}

impl SearchCriteria {
    fn validate(&self) -> BookingResult<ValidatedCriteria> {
        // A supplied name needs at least one letter; blank is not "absent".
        let guest_name = match self.guest_name.as_deref().map(str::trim) {
            Some(name) => {
                let mut letters = name.chars().filter(|c| *c != ' ').peekable();
                if letters.peek().is_none() || !letters.all(char::is_alphabetic) {
                    return Err(BookingError::bad_request(
                        "Guest name must contain only letters",
                    ));
                }
                Some(name.to_lowercase())
            }
            None => None,
        };
        let booking_date = match self.booking_date.as_deref().map(str::trim) {
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                BookingError::bad_request(format!(
                    "Invalid date '{raw}'. Should be YYYY-MM-DD"
                ))
            })?),
            None => None,
        };
        let length_of_stay = match self.length_of_stay {
            Some(nights) if nights <= 0 => {
                return Err(BookingError::bad_request(
                    "Length of stay cannot be less than 1",
                ));
            }
            Some(nights) => Some(u64::try_from(nights).map_err(|_| {
                BookingError::bad_request(format!("Length of stay {nights} is out of range"))
            })?),
            None => None,
        };
        if guest_name.is_none() && booking_date.is_none() && length_of_stay.is_none() {
            return Err(BookingError::bad_request(
                "Specify at least one search criterion",
            ));
        }
        Ok(ValidatedCriteria {
            guest_name,
            booking_date,
            length_of_stay,
        })
    }
}

impl ValidatedCriteria {
    fn matches(&self, record: &StoredBooking) -> bool {
        self.guest_name
            .as_ref()
            .is_none_or(|needle| record.guest_name.to_lowercase().contains(needle.as_str()))
            && self
                .booking_date
                .is_none_or(|date| record.booking_date == date)
            && self
                .length_of_stay
                .is_none_or(|nights| record.length_of_stay == nights)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<StoredBooking>,
}

impl RecordStore {
    pub fn new(records: Vec<StoredBooking>) -> Self {
        Self { records }
    }

    pub fn from_bookings(bookings: &[Booking]) -> BookingResult<Self> {
        let derived = derive::derive_all(bookings)?;
        let records = derived
            .into_iter()
            .zip(0u64..)
            .map(|(booking, id)| StoredBooking {
                id,
                booking_date: booking.booking_date,
                length_of_stay: booking.length_of_stay,
                guest_name: booking.raw.name.clone(),
                daily_rate: booking.raw.adr,
            })
            .collect();
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut reader =
            io_utils::open_csv_reader_from_path(path, io_utils::DEFAULT_CSV_DELIMITER)
                .with_context(|| format!("Opening record store {path:?}"))?;
        let records = reader
            .deserialize::<StoredBooking>()
            .enumerate()
            .map(|(idx, row)| row.with_context(|| format!("Reading store row {}", idx + 2)))
            .collect::<Result<Vec<StoredBooking>>>()?;
        debug!("Loaded {} stored booking(s) from {:?}", records.len(), path);
        Ok(Self { records })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = io_utils::open_csv_writer(Some(path), io_utils::DEFAULT_CSV_DELIMITER)?;
        for record in &self.records {
            writer
                .serialize(record)
                .with_context(|| format!("Writing booking {}", record.id))?;
        }
        writer
            .flush()
            .with_context(|| format!("Flushing record store {path:?}"))?;
        info!("Wrote {} booking(s) to {:?}", self.records.len(), path);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First [`RESULT_LIMIT`] records in id order.
    pub fn list(&self) -> Vec<&StoredBooking> {
        self.records.iter().take(RESULT_LIMIT).collect()
    }

    pub fn get(&self, id: u64) -> BookingResult<&StoredBooking> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or_else(|| BookingError::not_found(format!("Booking {id} not found")))
    }

    pub fn search(&self, criteria: &SearchCriteria) -> BookingResult<Vec<&StoredBooking>> {
        let criteria = criteria.validate()?;
        debug!("Searching store with {criteria:?}");
        let found: Vec<&StoredBooking> = self
            .records
            .iter()
            .filter(|record| criteria.matches(record))
            .take(RESULT_LIMIT)
            .collect();
        if found.is_empty() {
            return Err(BookingError::not_found(
                "Nothing was found according to the specified criteria",
            ));
        }
        Ok(found)
    }
}
