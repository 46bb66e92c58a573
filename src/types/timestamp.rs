//! Timestamp values read out of timestamp vectors.

use chrono::{DateTime, NaiveDateTime};

/// Highest supported fractional-second precision (nanoseconds).
pub const MAX_PRECISION: u8 = 9;

const NANOS_PER_MILLI: i32 = 1_000_000;

/// A timestamp as epoch milliseconds plus the nanoseconds within that millisecond.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampData {
    millisecond: i64,
    nano_of_millisecond: i32,
}

impl TimestampData {
    /// Creates a timestamp from epoch milliseconds and nano-of-millisecond.
    ///
    /// `nano_of_millisecond` is clamped to `[0, 999_999]`.
    #[must_use]
    pub fn from_epoch_millis(millisecond: i64, nano_of_millisecond: i32) -> Self {
        TimestampData {
            millisecond,
            nano_of_millisecond: nano_of_millisecond.clamp(0, NANOS_PER_MILLI - 1),
        }
    }

    /// Creates a timestamp from epoch microseconds.
    #[must_use]
    pub fn from_epoch_micros(micros: i64) -> Self {
        let millisecond = micros.div_euclid(1000);
        let nano_of_millisecond = (micros.rem_euclid(1000) * 1000) as i32;
        TimestampData {
            millisecond,
            nano_of_millisecond,
        }
    }

    /// Returns epoch milliseconds.
    #[must_use]
    pub const fn millisecond(&self) -> i64 {
        self.millisecond
    }

    /// Returns nanoseconds within the millisecond.
    #[must_use]
    pub const fn nano_of_millisecond(&self) -> i32 {
        self.nano_of_millisecond
    }

    /// Truncates the sub-second part to `precision` fractional digits.
    ///
    /// Precisions above [`MAX_PRECISION`] are treated as nanosecond precision.
    #[must_use]
    pub fn truncate_to(&self, precision: u8) -> Self {
        let precision = precision.min(MAX_PRECISION);
        if precision >= MAX_PRECISION {
            return *self;
        }
        if precision <= 3 {
            let unit = 10i64.pow(u32::from(3 - precision));
            return TimestampData {
                millisecond: self.millisecond - self.millisecond.rem_euclid(unit),
                nano_of_millisecond: 0,
            };
        }
        let unit = 10i32.pow(u32::from(MAX_PRECISION - precision));
        TimestampData {
            millisecond: self.millisecond,
            nano_of_millisecond: self.nano_of_millisecond - self.nano_of_millisecond % unit,
        }
    }

    /// Converts to a [`NaiveDateTime`] in UTC, if representable.
    #[must_use]
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        let secs = self.millisecond.div_euclid(1000);
        let millis = self.millisecond.rem_euclid(1000) as u32;
        let nanos = millis * 1_000_000 + self.nano_of_millisecond as u32;
        DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
    }
}
