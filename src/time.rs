// filepath: src/time.rs
//! Wall-clock readings for the clock widgets
//!
//! A reading is the number of milliseconds since local midnight. It is
//! derived from the current instant on every refresh and never stored.

use chrono::{Local, Offset, TimeZone, Utc};

pub const MS_PER_SECOND: u32 = 1000;
pub const MS_PER_MINUTE: u32 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u32 = 60 * MS_PER_MINUTE;
pub const MS_PER_HALF_DAY: u32 = 12 * MS_PER_HOUR;
pub const MS_PER_DAY: u32 = 24 * MS_PER_HOUR;

/// Source of the current instant and of the local zone offset
pub trait TimeSource {
    /// Milliseconds since the Unix epoch, UTC
    fn now_utc_millis(&self) -> i64;

    /// Offset of the local zone from UTC at `utc_millis`, in minutes east of UTC
    fn local_offset_minutes(&self, utc_millis: i64) -> i64;
}

/// The system clock and the system's local zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn local_offset_minutes(&self, utc_millis: i64) -> i64 {
        match Utc.timestamp_millis_opt(utc_millis).single() {
            Some(instant) => {
                let local = instant.with_timezone(&Local);
                i64::from(local.offset().fix().local_minus_utc()) / 60
            }
            None => 0,
        }
    }
}

/// A clock frozen at a given instant, for tests
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub utc_millis: i64,
    pub local_offset_minutes: i64,
}

#[cfg(test)]
impl TimeSource for FixedClock {
    fn now_utc_millis(&self) -> i64 {
        self.utc_millis
    }

    fn local_offset_minutes(&self, _utc_millis: i64) -> i64 {
        self.local_offset_minutes
    }
}

/// Milliseconds since midnight for `utc_millis`, shifted by `offset_minutes`
/// when given, otherwise by the local zone offset. Always in `[0, MS_PER_DAY)`.
pub fn millisecond_of_day(
    utc_millis: i64,
    offset_minutes: Option<i64>,
    local_offset_minutes: i64,
) -> u32 {
    let shift = offset_minutes.unwrap_or(local_offset_minutes);
    // i128 so that no offset value can overflow
    let local = i128::from(utc_millis) + i128::from(shift) * i128::from(MS_PER_MINUTE);
    local.rem_euclid(i128::from(MS_PER_DAY)) as u32
}

/// Milliseconds elapsed since local midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    millisecond_of_day: u32,
}

impl ClockReading {
    pub fn from_millisecond_of_day(millisecond_of_day: u32) -> Self {
        Self {
            millisecond_of_day: millisecond_of_day % MS_PER_DAY,
        }
    }

    /// Read the current time from `source`
    pub fn now(source: &dyn TimeSource, offset_minutes: Option<i64>) -> Self {
        let utc = source.now_utc_millis();
        let local_offset = source.local_offset_minutes(utc);
        Self::from_millisecond_of_day(millisecond_of_day(utc, offset_minutes, local_offset))
    }

    pub fn millisecond_of_day(&self) -> u32 {
        self.millisecond_of_day
    }

    /// Position of the hour hand; one revolution every 12 hours
    pub fn hour_fraction(&self) -> f64 {
        fraction_of(self.millisecond_of_day, MS_PER_HALF_DAY)
    }

    /// Position of the minute hand; one revolution every hour
    pub fn minute_fraction(&self) -> f64 {
        fraction_of(self.millisecond_of_day, MS_PER_HOUR)
    }

    /// Position of the second hand; one revolution every minute
    pub fn second_fraction(&self) -> f64 {
        fraction_of(self.millisecond_of_day, MS_PER_MINUTE)
    }
}

fn fraction_of(value: u32, period: u32) -> f64 {
    f64::from(value % period) / f64::from(period)
}
