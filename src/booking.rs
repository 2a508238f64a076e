//! Strongly typed booking record as it appears in the source dataset.
//!
//! Field names follow the dataset headers, except that the `phone-number`
//! column is written back out as `phone_number`. Cells that dataframe exports leave
//! as `NA`/`NULL` map to `None` for the optional fields, and integral counts
//! written as `2.0` are accepted.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

pub const RESORT_HOTEL: &str = "Resort Hotel";
pub const CITY_HOTEL: &str = "City Hotel";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub hotel: String,
    #[serde(deserialize_with = "flag")]
    pub is_canceled: bool,
    #[serde(deserialize_with = "count")]
    pub lead_time: u32,
    pub arrival_date_year: i32,
    pub arrival_date_month: String,
    #[serde(deserialize_with = "count")]
    pub arrival_date_week_number: u32,
    #[serde(deserialize_with = "count")]
    pub arrival_date_day_of_month: u32,
    #[serde(deserialize_with = "count")]
    pub stays_in_weekend_nights: u32,
    #[serde(deserialize_with = "count")]
    pub stays_in_week_nights: u32,
    #[serde(deserialize_with = "count")]
    pub adults: u32,
    #[serde(deserialize_with = "optional_count")]
    pub children: Option<u32>,
    #[serde(deserialize_with = "count")]
    pub babies: u32,
    pub meal: String,
    #[serde(deserialize_with = "optional_text")]
    pub country: Option<String>,
    pub market_segment: String,
    pub distribution_channel: String,
    #[serde(deserialize_with = "flag")]
    pub is_repeated_guest: bool,
    #[serde(deserialize_with = "count")]
    pub previous_cancellations: u32,
    #[serde(deserialize_with = "count")]
    pub previous_bookings_not_canceled: u32,
    pub reserved_room_type: String,
    pub assigned_room_type: String,
    #[serde(deserialize_with = "count")]
    pub booking_changes: u32,
    pub deposit_type: String,
    #[serde(deserialize_with = "optional_count")]
    pub agent: Option<u32>,
    #[serde(deserialize_with = "optional_count")]
    pub company: Option<u32>,
    #[serde(deserialize_with = "count")]
    pub days_in_waiting_list: u32,
    pub customer_type: String,
    pub adr: f64,
    #[serde(deserialize_with = "count")]
    pub required_car_parking_spaces: u32,
    #[serde(deserialize_with = "count")]
    pub total_of_special_requests: u32,
    pub reservation_status: String,
    pub reservation_status_date: String,
    pub name: String,
    pub email: String,
    #[serde(rename(deserialize = "phone-number"), alias = "phone_number")]
    pub phone_number: String,
    pub credit_card: String,
}

impl Booking {
    /// Nights booked, summed in `u64`.
    pub fn length_of_stay(&self) -> u64 {
        u64::from(self.stays_in_weekend_nights) + u64::from(self.stays_in_week_nights)
    }

    pub fn revenue(&self) -> f64 {
        self.length_of_stay() as f64 * self.adr
    }

    /// Children count with an absent value treated as zero.
    pub fn children(&self) -> u32 {
        self.children.unwrap_or(0)
    }

    pub fn total_guests(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children()) + u64::from(self.babies)
    }

    pub fn has_children_or_babies(&self) -> bool {
        self.children() > 0 || self.babies > 0
    }

    pub fn is_active(&self) -> bool {
        !self.is_canceled
    }
}

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") || trimmed.eq_ignore_ascii_case("null")
}

fn parse_count(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(value);
    }
    let float: f64 = trimmed
        .parse()
        .map_err(|_| format!("Failed to parse '{raw}' as a count"))?;
    if float.fract() != 0.0 || float < 0.0 || float > f64::from(u32::MAX) {
        return Err(format!("'{raw}' is not a whole non-negative count"));
    }
    Ok(float as u32)
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        _ => Err(D::Error::custom(format!("Failed to parse '{raw}' as boolean"))),
    }
}

fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_count(&raw).map_err(D::Error::custom)
}

fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if is_missing(&raw) {
        return Ok(None);
    }
    parse_count(&raw).map(Some).map_err(D::Error::custom)
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if is_missing(&raw) {
        Ok(None)
    } else {
        Ok(Some(raw.trim().to_string()))
    }
}
