//! Run configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the simulation builder.  Every struct has a
//! `Default` so partial files only need to name the fields they change.

use crate::{CoreError, CoreResult, Tick};

// ── EscalatorConfig ───────────────────────────────────────────────────────────

/// Shape and belt speed of one escalator.
///
/// Validated by `esc_escalator::Escalator::new`, which rejects a zero
/// `length` or `lane_count` and a negative or non-finite `belt_velocity`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EscalatorConfig {
    /// Number of cells (steps) per lane.
    pub length: usize,
    /// Number of parallel lanes.
    pub lane_count: usize,
    /// Cells per tick contributed by the belt itself.
    pub belt_velocity: f64,
}

impl Default for EscalatorConfig {
    fn default() -> Self {
        Self {
            length:        20,
            lane_count:    2,
            belt_velocity: 1.0,
        }
    }
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

/// How an arriving person picks the lane they try to board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LanePolicy {
    /// Uniformly random lane, chosen once on arrival.
    #[default]
    Random,
    /// Lowest-index lane whose entry slot is empty at the moment of boarding.
    FirstEmpty,
    /// Always the given lane.
    Fixed(u32),
}

/// Parameters of the stochastic arrival process at the bottom landing.
///
/// Each tick runs `max_per_tick` independent trials, each producing one
/// arrival with `probability`.  Walking speeds are uniform in
/// `[min_speed, max_speed]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalConfig {
    pub probability:  f64,
    pub max_per_tick: u32,
    pub min_speed:    f64,
    pub max_speed:    f64,
    pub lane_policy:  LanePolicy,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            probability:  0.5,
            max_per_tick: 2,
            min_speed:    0.0,
            max_speed:    1.0,
            lane_policy:  LanePolicy::Random,
        }
    }
}

impl ArrivalConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(CoreError::Config(format!(
                "arrival probability must be in [0, 1], got {}",
                self.probability
            )));
        }
        if !self.min_speed.is_finite() || !self.max_speed.is_finite() {
            return Err(CoreError::Config("walking speeds must be finite".into()));
        }
        if self.min_speed < 0.0 || self.min_speed > self.max_speed {
            return Err(CoreError::Config(format!(
                "walking speed range [{}, {}] is invalid",
                self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seconds per tick.  Only used for reporting.
    pub tick_duration_secs: u32,

    /// Take an occupancy snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    pub escalator: EscalatorConfig,

    pub arrivals: ArrivalConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           600,
            seed:                  42,
            tick_duration_secs:    1,
            output_interval_ticks: 1,
            escalator:             EscalatorConfig::default(),
            arrivals:              ArrivalConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.tick_duration_secs)
    }

    /// Check the parts of the configuration that are not owned by the
    /// escalator itself.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be positive".into()));
        }
        if let LanePolicy::Fixed(lane) = self.arrivals.lane_policy {
            if lane as usize >= self.escalator.lane_count {
                return Err(CoreError::Config(format!(
                    "fixed lane {lane} is outside 0..{}",
                    self.escalator.lane_count
                )));
            }
        }
        self.arrivals.validate()
    }
}
