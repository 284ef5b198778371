//! Clock abstraction for day keys and message times.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Format of calendar day keys.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format of displayable message times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Source of the current local date and time.
pub trait Clock {
    /// Current calendar day key (`YYYY-MM-DD`).
    fn today(&self) -> String;
    /// Current time of day (`HH:MM`).
    fn time_of_day(&self) -> String;
}

/// Wall clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().format(DAY_KEY_FORMAT).to_string()
    }

    fn time_of_day(&self) -> String {
        Local::now().format(TIME_FORMAT).to_string()
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Create a clock frozen at `HH:MM` on `date`. Invalid times fall back to midnight.
    #[must_use]
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let time = date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        Self::new(time)
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn read(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.read().format(DAY_KEY_FORMAT).to_string()
    }

    fn time_of_day(&self) -> String {
        self.read().format(TIME_FORMAT).to_string()
    }
}

/// Parse a day key. Accepts non-padded month and day (`2024-1-5`).
#[must_use]
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
