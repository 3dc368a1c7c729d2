//! Time keeping module for PineTime

use chrono::{DateTime, Duration, NaiveDateTime, Timelike};
use embassy_time::Instant;

pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from a UNIX timestamp and an offset to
    /// local time, both in seconds
    pub fn from_timestamp(secs: i64, utc_offset_secs: i32) -> Self {
        let time = DateTime::from_timestamp(secs + utc_offset_secs as i64, 0)
            .map(|utc| utc.naive_utc())
            .unwrap_or(NaiveDateTime::UNIX_EPOCH);

        Self {
            time,
            instant: Instant::now(),
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current local time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference.time + Duration::microseconds(elapsed.as_micros() as i64)
    }

    /// Time left until the next full minute
    pub fn until_next_minute(&self) -> embassy_time::Duration {
        let now = self.get_time();
        let elapsed_ms = now.second() as u64 * 1_000 + now.nanosecond() as u64 / 1_000_000;
        embassy_time::Duration::from_millis(60_000 - elapsed_ms.min(59_999))
    }
}
