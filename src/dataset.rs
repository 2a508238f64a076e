//! Loads the booking dataset into memory.
//!
//! The whole file is read into a fresh `Vec<Booking>` on every call; nothing is
//! cached between invocations, so each caller owns its own table.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{booking::Booking, io_utils};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

pub fn load_bookings(path: &Path, options: LoadOptions) -> Result<Vec<Booking>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, options.delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, options.encoding)
        .with_context(|| format!("Reading headers from {path:?}"))?;
    debug!("Dataset headers: {:?}", headers.iter().collect::<Vec<_>>());

    let mut bookings = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, options.encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        let booking: Booking = decoded
            .deserialize(Some(&headers))
            .with_context(|| format!("Parsing booking on row {}", row_idx + 2))?;
        bookings.push(booking);
    }
    info!("Loaded {} booking(s) from {:?}", bookings.len(), path);
    Ok(bookings)
}
