mod readout;

pub use readout::{Hms, TimerReadout};

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::clock::CommercialZone;
use crate::error::Result;
use crate::render::Renderer;
use crate::scheduler::{Scheduler, TimerKind};

/// Nominal countdown period.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    /// Terminal. Never re-armed.
    Expired,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running, this much left.
    Running(Hms),
    /// This tick ended the offer. Returned exactly once per engine.
    Expired { deadline: DateTime<Utc> },
    /// Already expired; nothing was done.
    Idle,
}

/// Offer countdown to the end of the commercial day.
///
/// Expires on the first tick at or past the end of the commercial day. The
/// deadline is recomputed every tick, but the engine remembers the last one
/// it saw: if a delayed tick (or a tab coming back from the background)
/// lands after that deadline, the offer is over even though "end of today"
/// has moved on to tomorrow.
#[derive(Debug)]
pub struct CountdownEngine {
    zone: CommercialZone,
    state: CountdownState,
    deadline: Option<DateTime<Utc>>,
}

impl CountdownEngine {
    pub fn new(zone: CommercialZone) -> Self {
        Self {
            zone,
            state: CountdownState::Running,
            deadline: None,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// End of the current commercial day.
    pub fn end_of_day(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.zone.end_of_day(now)
    }

    /// Render now, then arm the 1 Hz tick unless that first render already
    /// expired the offer. Also used to resume after the page was hidden.
    pub fn start(
        &mut self,
        now: DateTime<Utc>,
        sched: &mut dyn Scheduler,
        renderer: &mut dyn Renderer,
    ) -> Result<TickOutcome> {
        let outcome = self.tick(now, sched, renderer);

        // A failed deadline lookup still keeps the timer ticking so the
        // next second can recover.
        if self.state == CountdownState::Running {
            sched.arm(TimerKind::Countdown, TICK_PERIOD);
        }
        outcome
    }

    /// Stop ticking while the page is hidden.
    pub fn suspend(&mut self, sched: &mut dyn Scheduler) {
        if sched.is_armed(TimerKind::Countdown) {
            debug!("countdown suspended");
            sched.cancel(TimerKind::Countdown);
        }
    }

    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        sched: &mut dyn Scheduler,
        renderer: &mut dyn Renderer,
    ) -> Result<TickOutcome> {
        if self.state == CountdownState::Expired {
            return Ok(TickOutcome::Idle);
        }

        let end_of_day = match self.zone.end_of_day(now) {
            Ok(end) => end,
            Err(e) => {
                renderer.render_timer(&TimerReadout::Unavailable);
                return Err(e);
            }
        };

        if let Some(previous) = self.deadline {
            if now >= previous {
                return Ok(self.expire(previous, sched, renderer));
            }
        }

        let remaining_ms = (end_of_day - now).num_milliseconds();
        if remaining_ms <= 0 {
            return Ok(self.expire(end_of_day, sched, renderer));
        }

        // The last partial second reads 00:00:00 while still running.
        let hms = Hms::from_ms(remaining_ms);
        self.deadline = Some(end_of_day);
        renderer.render_timer(&TimerReadout::Remaining(hms));
        Ok(TickOutcome::Running(hms))
    }

    fn expire(
        &mut self,
        deadline: DateTime<Utc>,
        sched: &mut dyn Scheduler,
        renderer: &mut dyn Renderer,
    ) -> TickOutcome {
        self.state = CountdownState::Expired;
        sched.cancel(TimerKind::Countdown);
        renderer.render_timer(&TimerReadout::Expired);
        info!(%deadline, zone = self.zone.name(), "offer countdown expired");
        TickOutcome::Expired { deadline }
    }
}
