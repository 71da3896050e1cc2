//! The `Sim` struct and its tick loop.

use std::collections::VecDeque;

use esc_core::{LaneId, LanePolicy, PersonId, SimClock, SimConfig, SimRng, Tick};
use esc_escalator::{Admission, Escalator, Person};
use tracing::{debug, info};

use crate::{ArrivalModel, SimError, SimObserver, SimResult, TickSummary, TripLog, TripRecord};

/// The escalator type driven by [`Sim`].
pub type SimEscalator = Escalator<Person, TripLog>;

/// A person waiting at the bottom landing.
#[derive(Clone, Debug, PartialEq)]
pub struct Waiting {
    pub person:  Person,
    /// Lane picked on arrival; `None` under `LanePolicy::FirstEmpty`, which
    /// picks at boarding time instead.
    pub lane:    Option<LaneId>,
    pub arrived: Tick,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Owns the escalator, the boarding queue and the RNG streams, and drives the
/// four-phase tick loop described in the crate docs.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: ArrivalModel> {
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: SimClock,

    /// The escalator, with a [`TripLog`] recording boardings and exits.
    pub escalator: SimEscalator,

    /// FIFO of people who have arrived but not yet boarded.
    pub queue: VecDeque<Waiting>,

    pub arrivals: A,

    pub lane_policy: LanePolicy,

    pub(crate) arrival_rng: SimRng,
    pub(crate) lane_rng:    SimRng,
    pub(crate) next_person: u32,
}

impl<A: ArrivalModel> Sim<A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            ticks = self.config.total_ticks,
            lanes = self.escalator.lane_count(),
            length = self.escalator.length(),
            belt_velocity = self.escalator.belt_velocity(),
            "starting escalator simulation"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.tick_once(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            completed = self.trips().len(),
            on_board = self.escalator.occupant_count(),
            queued = self.queue.len(),
            mean_ride_ticks = self.mean_ride_ticks().unwrap_or(0.0),
            "simulation finished at {}",
            self.clock
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_once(observer)?;
        }
        Ok(())
    }

    /// Every completed ride so far, in exit order.
    pub fn trips(&self) -> &[TripRecord] {
        self.escalator.hooks().completed()
    }

    /// Mean ticks from boarding to exit over completed rides.
    pub fn mean_ride_ticks(&self) -> Option<f64> {
        let trips = self.trips();
        if trips.is_empty() {
            return None;
        }
        let total: u64 = trips.iter().map(TripRecord::ride_ticks).sum();
        Some(total as f64 / trips.len() as f64)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.escalator);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        self.escalator.hooks_mut().now = now;

        // ── Phase 1: move riders ──────────────────────────────────────────
        let report = self.escalator.step();
        if report.collisions > 0 {
            let on_board: Vec<PersonId> =
                self.escalator.occupants().map(|(_, _, p)| p.id).collect();
            self.escalator.hooks_mut().prune(on_board.into_iter());
        }

        // ── Phase 2: arrivals join the queue ──────────────────────────────
        let speeds = self.arrivals.arrivals(now, &mut self.arrival_rng);
        let arrivals = speeds.len();
        for speed in speeds {
            let person = Person::new(self.issue_person_id()?, speed);
            let lane = self.assign_lane();
            self.queue.push_back(Waiting { person, lane, arrived: now });
        }

        // ── Phase 3: one boarding attempt per waiting person ──────────────
        let (admitted, rejected) = self.board_queue()?;

        Ok(TickSummary {
            tick: now,
            arrivals,
            admitted,
            rejected,
            exited: report.exited,
            collisions: report.collisions,
            queued: self.queue.len(),
            on_board: self.escalator.occupant_count(),
        })
    }

    /// Next unused person id.  `u32::MAX` is the invalid sentinel and is
    /// never issued.
    fn issue_person_id(&mut self) -> SimResult<PersonId> {
        let id = self.next_person;
        self.next_person = id
            .checked_add(1)
            .ok_or(SimError::PersonIdsExhausted { issued: id })?;
        Ok(PersonId(id))
    }

    /// Lane chosen at arrival time, if the policy chooses then.
    fn assign_lane(&mut self) -> Option<LaneId> {
        match self.lane_policy {
            LanePolicy::Random => {
                let lanes = self.escalator.lane_count() as u32;
                Some(LaneId(self.lane_rng.gen_range(0..lanes)))
            }
            LanePolicy::Fixed(lane) => Some(LaneId(lane)),
            LanePolicy::FirstEmpty => None,
        }
    }

    /// Attempt to board every queued person once, front to back.
    ///
    /// Returns `(admitted, rejected)`.
    fn board_queue(&mut self) -> SimResult<(usize, usize)> {
        let mut admitted = 0;
        let mut rejected = 0;
        let mut still_waiting = VecDeque::with_capacity(self.queue.len());

        while let Some(mut waiting) = self.queue.pop_front() {
            let lane = match waiting.lane {
                Some(lane) => Some(lane),
                None => self
                    .escalator
                    .entry_state()
                    .into_iter()
                    .find(|(_, state)| state.is_empty())
                    .map(|(lane, _)| lane),
            };

            let Some(lane) = lane else {
                rejected += 1;
                still_waiting.push_back(waiting);
                continue;
            };

            match self.escalator.add_person(waiting.person, lane.0 as i64)? {
                Admission::Admitted => admitted += 1,
                Admission::Rejected(person) => {
                    debug!(person = %person.id, %lane, "boarding refused; waiting");
                    rejected += 1;
                    waiting.person = person;
                    still_waiting.push_back(waiting);
                }
            }
        }

        self.queue = still_waiting;
        Ok((admitted, rejected))
    }
}
