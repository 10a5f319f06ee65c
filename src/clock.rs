//! Clock
//!
//! Source of "today" and of creation timestamps for item ids.

use chrono::{Local, NaiveDate, Utc};

/// Provides the current calendar date and time
pub trait Clock: Send + Sync {
    /// The calendar date items are recorded against
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock; "today" is the UTC date unless `local_dates` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub local_dates: bool,
}

impl SystemClock {
    pub fn new(local_dates: bool) -> Self {
        Self { local_dates }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        if self.local_dates {
            Local::now().date_naive()
        } else {
            Utc::now().date_naive()
        }
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock pinned to one date and instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub millis: i64,
}

impl FixedClock {
    pub fn new(date: NaiveDate, millis: i64) -> Self {
        Self { date, millis }
    }

    /// Pinned to midnight UTC of `date`
    pub fn on(date: NaiveDate) -> Self {
        let millis = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { date, millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}
