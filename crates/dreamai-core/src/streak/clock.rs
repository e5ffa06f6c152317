//! Time sources for streak evaluation.

use chrono::{DateTime, Local, TimeZone};

/// Source of "now". Calendar days are taken in the clock's time zone.
pub trait Clock {
    type Zone: TimeZone;

    fn now(&self) -> DateTime<Self::Zone>;
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant, in any time zone.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    instant: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Zone = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.instant.clone()
    }
}
