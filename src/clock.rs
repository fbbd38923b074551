use crate::models::DATE_FORMAT;
use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone};

/// Source of the current instant. Entry dates are read as midnight in `Tz`.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;

    /// Current calendar day as a `YYYY-MM-DD` key.
    fn today(&self) -> String {
        self.now().date_naive().format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now = self.now + by;
    }
}

impl Clock for FixedClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
