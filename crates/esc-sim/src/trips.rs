//! Ride bookkeeping: the escalator hooks used by the sim.

use std::collections::{HashMap, HashSet};

use esc_core::{LaneId, PersonId, Tick};
use esc_escalator::{EscalatorHooks, Person};

/// One completed ride, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripRecord {
    pub person:  PersonId,
    pub lane:    LaneId,
    pub speed:   f64,
    pub boarded: Tick,
    pub exited:  Tick,
}

impl TripRecord {
    /// Ticks spent on the escalator.
    #[inline]
    pub fn ride_ticks(&self) -> u64 {
        self.exited.since(self.boarded)
    }
}

/// [`EscalatorHooks`] that timestamp every boarding and turn every exit into
/// a [`TripRecord`].
///
/// The sim sets [`now`][Self::now] before touching the escalator each tick.
#[derive(Debug, Default)]
pub struct TripLog {
    pub now:    Tick,
    boarded_at: HashMap<PersonId, Tick>,
    completed:  Vec<TripRecord>,
}

impl TripLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every completed ride, in exit order.
    pub fn completed(&self) -> &[TripRecord] {
        &self.completed
    }

    /// Riders currently on the escalator.
    pub fn riding(&self) -> usize {
        self.boarded_at.len()
    }

    /// Forget a rider that disappeared without exiting (collision loss).
    pub(crate) fn prune(&mut self, on_board: impl Iterator<Item = PersonId>) {
        let present: HashSet<PersonId> = on_board.collect();
        self.boarded_at.retain(|id, _| present.contains(id));
    }
}

impl EscalatorHooks<Person> for TripLog {
    fn on_enter(&mut self, _lane: LaneId, person: &Person) {
        self.boarded_at.insert(person.id, self.now);
    }

    fn on_exit(&mut self, lane: LaneId, person: Person) {
        let boarded = self.boarded_at.remove(&person.id).unwrap_or(self.now);
        self.completed.push(TripRecord {
            person: person.id,
            lane,
            speed: person.speed,
            boarded,
            exited: self.now,
        });
    }
}
