#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use hotel_bookings::booking::{Booking, CITY_HOTEL, RESORT_HOTEL};
use tempfile::{TempDir, tempdir};

/// Column headers as they appear in the published dataset.
pub const DATASET_HEADER: [&str; 36] = [
    "hotel",
    "is_canceled",
    "lead_time",
    "arrival_date_year",
    "arrival_date_month",
    "arrival_date_week_number",
    "arrival_date_day_of_month",
    "stays_in_weekend_nights",
    "stays_in_week_nights",
    "adults",
    "children",
    "babies",
    "meal",
    "country",
    "market_segment",
    "distribution_channel",
    "is_repeated_guest",
    "previous_cancellations",
    "previous_bookings_not_canceled",
    "reserved_room_type",
    "assigned_room_type",
    "booking_changes",
    "deposit_type",
    "agent",
    "company",
    "days_in_waiting_list",
    "customer_type",
    "adr",
    "required_car_parking_spaces",
    "total_of_special_requests",
    "reservation_status",
    "reservation_status_date",
    "name",
    "email",
    "phone-number",
    "credit_card",
];

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Serializes `bookings` as a dataset CSV under the workspace.
    pub fn write_dataset(&self, name: &str, bookings: &[Booking]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .expect("create dataset");
        writer
            .write_record(DATASET_HEADER)
            .expect("write dataset header");
        for booking in bookings {
            writer.serialize(booking).expect("write booking");
        }
        writer.flush().expect("flush dataset");
        path
    }
}

/// A non-cancelled two-adult resort booking arriving on 2017-07-15.
pub fn booking() -> Booking {
    Booking {
        hotel: RESORT_HOTEL.to_string(),
        is_canceled: false,
        lead_time: 10,
        arrival_date_year: 2017,
        arrival_date_month: "July".to_string(),
        arrival_date_week_number: 28,
        arrival_date_day_of_month: 15,
        stays_in_weekend_nights: 1,
        stays_in_week_nights: 2,
        adults: 2,
        children: Some(0),
        babies: 0,
        meal: "BB".to_string(),
        country: Some("PRT".to_string()),
        market_segment: "Online TA".to_string(),
        distribution_channel: "TA/TO".to_string(),
        is_repeated_guest: false,
        previous_cancellations: 0,
        previous_bookings_not_canceled: 0,
        reserved_room_type: "A".to_string(),
        assigned_room_type: "A".to_string(),
        booking_changes: 0,
        deposit_type: "No Deposit".to_string(),
        agent: Some(9),
        company: None,
        days_in_waiting_list: 0,
        customer_type: "Transient".to_string(),
        adr: 100.0,
        required_car_parking_spaces: 0,
        total_of_special_requests: 0,
        reservation_status: "Check-Out".to_string(),
        reservation_status_date: "2017-07-18".to_string(),
        name: "Ernest Barnes".to_string(),
        email: "ernest.barnes@example.com".to_string(),
        phone_number: "669-792-1661".to_string(),
        credit_card: "************4322".to_string(),
    }
}

pub fn city_booking() -> Booking {
    Booking {
        hotel: CITY_HOTEL.to_string(),
        ..booking()
    }
}

pub fn from_country(country: &str) -> Booking {
    Booking {
        country: Some(country.to_string()),
        ..booking()
    }
}

pub fn cancelled(mut booking: Booking) -> Booking {
    booking.is_canceled = true;
    booking
}

pub fn arriving(year: i32, month: &str, day: u32, lead_time: u32) -> Booking {
    Booking {
        arrival_date_year: year,
        arrival_date_month: month.to_string(),
        arrival_date_day_of_month: day,
        lead_time,
        ..booking()
    }
}
