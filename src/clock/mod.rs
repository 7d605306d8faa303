mod commercial;

pub use commercial::CommercialZone;

use chrono::{DateTime, Utc};

/// Source of "now" for the page. Injected so tests can drive time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock frozen at a given instant. Clones share the same time, so a
    /// test can keep one handle and give another to the page.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Rc::new(Cell::new(now)),
            }
        }

        pub fn advance_ms(&self, ms: i64) {
            self.now.set(self.now.get() + Duration::milliseconds(ms));
        }

        pub fn set(&self, now: DateTime<Utc>) {
            self.now.set(now);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}
