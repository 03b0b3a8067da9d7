use crate::domain::ports::Clock;
use chrono::{Local, NaiveDate};

/// Reads today's date from the local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
