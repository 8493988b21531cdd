use chrono::{Local, NaiveDateTime};

/// Wall-clock seam so due-matching can be tested against a fixed "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time, matching how operators write schedule dates.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
