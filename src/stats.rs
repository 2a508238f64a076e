//! Numeric helpers shared by the reports: running means, ratios, and
//! two-decimal rounding.
//!
//! Rounding goes through `rust_decimal` on the exact binary value of the
//! `f64`, half-to-even, so `3.145` (stored as `3.14499…`) rounds to `3.14`
//! and `0.125` rounds to `0.12`.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::error::{BookingError, BookingResult};

pub const DISPLAY_SCALE: u32 = 2;

pub fn round2(value: f64) -> BookingResult<f64> {
    round_to(value, DISPLAY_SCALE)
}

pub fn round_to(value: f64, scale: u32) -> BookingResult<f64> {
    let decimal = Decimal::from_f64_retain(value)
        .ok_or_else(|| BookingError::data(format!("Value {value} cannot be rounded")))?;
    decimal
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .ok_or_else(|| BookingError::data(format!("Value {value} out of range after rounding")))
}

/// `part / total * 100`, rounded to two decimals.
pub fn percentage(part: usize, total: usize, what: &str) -> BookingResult<f64> {
    if total == 0 {
        return Err(BookingError::data(format!(
            "Cannot compute {what} over an empty set of bookings"
        )));
    }
    round2(part as f64 / total as f64 * 100.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum / self.count as f64)
        } else {
            None
        }
    }

    pub fn rounded_mean(&self, what: &str) -> BookingResult<f64> {
        let mean = self.mean().ok_or_else(|| {
            BookingError::data(format!("Cannot average {what} over an empty set of bookings"))
        })?;
        round2(mean)
    }
}

impl FromIterator<f64> for MeanAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        for value in iter {
            acc.add(value);
        }
        acc
    }
}
