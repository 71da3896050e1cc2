//! Arrival processes at the bottom landing.

use std::collections::BTreeMap;

use esc_core::{ArrivalConfig, SimRng, Tick};

/// Produces the people who reach the bottom of the escalator each tick.
///
/// Returns one walking speed per new arrival; the sim assigns identities.
pub trait ArrivalModel {
    fn arrivals(&self, tick: Tick, rng: &mut SimRng) -> Vec<f64>;
}

/// Nobody ever arrives.  Useful when a test places riders by hand.
pub struct NoArrivals;

impl ArrivalModel for NoArrivals {
    fn arrivals(&self, _tick: Tick, _rng: &mut SimRng) -> Vec<f64> {
        vec![]
    }
}

/// `max_per_tick` independent trials per tick, each an arrival with
/// `probability`.  Speeds are uniform in `[min_speed, max_speed]`.
#[derive(Clone, Debug)]
pub struct BernoulliArrivals {
    pub probability:  f64,
    pub max_per_tick: u32,
    pub min_speed:    f64,
    pub max_speed:    f64,
}

impl BernoulliArrivals {
    pub fn from_config(config: &ArrivalConfig) -> Self {
        Self {
            probability:  config.probability,
            max_per_tick: config.max_per_tick,
            min_speed:    config.min_speed,
            max_speed:    config.max_speed,
        }
    }

    fn draw_speed(&self, rng: &mut SimRng) -> f64 {
        if self.max_speed > self.min_speed {
            rng.gen_range(self.min_speed..=self.max_speed)
        } else {
            self.min_speed
        }
    }
}

impl ArrivalModel for BernoulliArrivals {
    fn arrivals(&self, _tick: Tick, rng: &mut SimRng) -> Vec<f64> {
        let count = (0..self.max_per_tick)
            .filter(|_| rng.gen_bool(self.probability))
            .count();
        (0..count).map(|_| self.draw_speed(rng)).collect()
    }
}

/// A fixed timetable of arrivals: `tick → speeds`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedArrivals {
    schedule: BTreeMap<Tick, Vec<f64>>,
}

impl ScriptedArrivals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one arrival walking at `speed` at `tick`.
    pub fn at(mut self, tick: Tick, speed: f64) -> Self {
        self.schedule.entry(tick).or_default().push(speed);
        self
    }

    /// Total number of scheduled arrivals.
    pub fn len(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArrivalModel for ScriptedArrivals {
    fn arrivals(&self, tick: Tick, _rng: &mut SimRng) -> Vec<f64> {
        self.schedule.get(&tick).cloned().unwrap_or_default()
    }
}
