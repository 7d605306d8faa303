use std::collections::HashMap;
use std::time::Duration;

use futures_util::future::{select_all, FutureExt};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Periodic timers the page runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 1 Hz offer countdown
    Countdown,
    /// Once-a-minute stock decay trial
    StockDecay,
}

/// Start/stop control over periodic timers. The page decides what a tick
/// means; the scheduler only decides when it happens.
pub trait Scheduler {
    /// Arm (or re-arm) a periodic timer. The first tick fires one period
    /// from now.
    fn arm(&mut self, timer: TimerKind, period: Duration);

    fn cancel(&mut self, timer: TimerKind);

    fn is_armed(&self, timer: TimerKind) -> bool;
}

/// Scheduler backed by tokio intervals.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    intervals: HashMap<TimerKind, Interval>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next armed timer to fire. Pends forever when nothing is
    /// armed, so it can sit in a `select!` next to other sources.
    pub async fn next(&mut self) -> TimerKind {
        if self.intervals.is_empty() {
            return std::future::pending().await;
        }

        let ticks = self
            .intervals
            .iter_mut()
            .map(|(kind, interval)| {
                let kind = *kind;
                async move {
                    interval.tick().await;
                    kind
                }
                .boxed()
            });

        let (kind, _, _) = select_all(ticks).await;
        kind
    }
}

impl Scheduler for TokioScheduler {
    fn arm(&mut self, timer: TimerKind, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        // A late tick should not be followed by a burst of catch-up ticks;
        // every tick recomputes from the clock anyway.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.intervals.insert(timer, interval);
    }

    fn cancel(&mut self, timer: TimerKind) {
        self.intervals.remove(&timer);
    }

    fn is_armed(&self, timer: TimerKind) -> bool {
        self.intervals.contains_key(&timer)
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use super::{Scheduler, TimerKind};
    use std::collections::HashMap;
    use std::time::Duration;

    /// Records armed timers without ever firing them. Tests deliver ticks
    /// by hand.
    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        armed: HashMap<TimerKind, Duration>,
        /// Number of times each timer was armed.
        pub arm_count: HashMap<TimerKind, usize>,
    }

    impl ManualScheduler {
        pub fn period(&self, timer: TimerKind) -> Option<Duration> {
            self.armed.get(&timer).copied()
        }
    }

    impl Scheduler for ManualScheduler {
        fn arm(&mut self, timer: TimerKind, period: Duration) {
            self.armed.insert(timer, period);
            *self.arm_count.entry(timer).or_default() += 1;
        }

        fn cancel(&mut self, timer: TimerKind) {
            self.armed.remove(&timer);
        }

        fn is_armed(&self, timer: TimerKind) -> bool {
            self.armed.contains_key(&timer)
        }
    }
}
