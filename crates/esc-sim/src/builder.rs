//! Fluent builder for constructing a [`Sim`].

use std::collections::VecDeque;

use esc_core::{LanePolicy, SimConfig, SimRng};
use esc_escalator::Escalator;

use crate::{ArrivalModel, BernoulliArrivals, Sim, SimResult, TripLog};

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — escalator shape, total ticks, seed, arrival parameters
/// - `A: ArrivalModel` — the arrival process
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                          |
/// |---------------------|----------------------------------|
/// | `.lane_policy(p)`   | `config.arrivals.lane_policy`    |
///
/// # Example
///
/// ```rust,ignore
/// let arrivals = ScriptedArrivals::new().at(Tick(0), 0.0);
/// let mut sim = SimBuilder::new(config, arrivals)
///     .lane_policy(LanePolicy::FirstEmpty)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: ArrivalModel> {
    config:      SimConfig,
    arrivals:    A,
    lane_policy: Option<LanePolicy>,
}

impl SimBuilder<BernoulliArrivals> {
    /// A builder whose arrival process comes from `config.arrivals`.
    pub fn from_config(config: SimConfig) -> Self {
        let arrivals = BernoulliArrivals::from_config(&config.arrivals);
        Self::new(config, arrivals)
    }
}

impl<A: ArrivalModel> SimBuilder<A> {
    pub fn new(config: SimConfig, arrivals: A) -> Self {
        Self {
            config,
            arrivals,
            lane_policy: None,
        }
    }

    /// Override how arriving people choose a lane.
    pub fn lane_policy(mut self, policy: LanePolicy) -> Self {
        self.lane_policy = Some(policy);
        self
    }

    /// Validate inputs, build the escalator, and return a ready-to-run
    /// [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<A>> {
        if let Some(policy) = self.lane_policy {
            self.config.arrivals.lane_policy = policy;
        }
        self.config.validate()?;
        let escalator = Escalator::new(&self.config.escalator, TripLog::new())?;

        // Arrival draws and lane draws use independent streams.
        let mut root = SimRng::new(self.config.seed);
        let arrival_rng = root.child(1);
        let lane_rng = root.child(2);

        Ok(Sim {
            clock:       self.config.make_clock(),
            lane_policy: self.config.arrivals.lane_policy,
            config:      self.config,
            escalator,
            queue:       VecDeque::new(),
            arrivals:    self.arrivals,
            arrival_rng,
            lane_rng,
            next_person: 0,
        })
    }
}
