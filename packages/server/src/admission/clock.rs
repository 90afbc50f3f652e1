use std::fmt;

use chrono::{DateTime, Utc};

/// Time source for contest window comparisons.
///
/// Production code injects [`SystemClock`]; tests inject a fixed instant so
/// schedule decisions are deterministic.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
