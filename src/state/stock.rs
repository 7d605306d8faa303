use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use super::ExpiryFlag;
use crate::render::Renderer;

/// Nominal interval between decay trials.
pub const DECAY_INTERVAL: Duration = Duration::from_secs(60);

/// Tuning for the urgency counter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StockTuning {
    pub initial: u32,
    /// Never shown below this.
    pub floor: u32,
    /// Chance per trial of a drop, in (0, 1).
    pub decay_probability: f64,
    /// A drop removes 1..=max_decrement units.
    pub max_decrement: u32,
}

impl Default for StockTuning {
    fn default() -> Self {
        Self {
            initial: 47,
            floor: 19,
            decay_probability: 0.10,
            max_decrement: 2,
        }
    }
}

/// Cosmetic "units left" counter. This is an urgency signal, not
/// inventory: it only ever goes down, stops at the floor, and freezes when
/// the offer expires.
#[derive(Debug, Clone)]
pub struct StockModel {
    level: u32,
    tuning: StockTuning,
    expiry: ExpiryFlag,
}

impl StockModel {
    pub fn new(tuning: StockTuning, expiry: ExpiryFlag) -> Self {
        Self {
            level: tuning.initial,
            tuning,
            expiry,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Run one decay trial. Returns the new level if it changed.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, renderer: &mut dyn Renderer) -> Option<u32> {
        if self.expiry.is_expired() || self.level <= self.tuning.floor {
            return None;
        }

        let sample: f64 = rng.gen();
        if sample >= self.tuning.decay_probability {
            return None;
        }

        let amount = rng.gen_range(1..=self.tuning.max_decrement.max(1));
        self.decrement(amount, renderer)
    }

    /// Remove `amount` units, clamped to the floor.
    fn decrement(&mut self, amount: u32, renderer: &mut dyn Renderer) -> Option<u32> {
        let next = self.level.saturating_sub(amount).max(self.tuning.floor);
        if next == self.level {
            return None;
        }

        debug!(from = self.level, to = next, "stock decay");
        self.level = next;
        renderer.render_stock(next, true);
        Some(next)
    }
}
