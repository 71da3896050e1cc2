//! The `Escalator` grid and its step function.

use std::collections::BTreeMap;

use esc_core::{EscalatorConfig, LaneId, PersonId};
use tracing::{debug, warn};

use crate::{Admission, EntryState, EscalatorError, EscalatorHooks, EscalatorResult, NoopHooks, Occupant};

// ── StepReport ────────────────────────────────────────────────────────────────

/// What happened during one [`Escalator::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Occupants placed in the next grid (before collision losses).
    pub carried: usize,
    /// Occupants that left the top and were handed to `on_exit`.
    pub exited: usize,
    /// Occupants overwritten by a later occupant landing on the same cell.
    pub collisions: usize,
}

impl StepReport {
    /// Occupants still on the escalator after the step.
    #[inline]
    pub fn on_board(&self) -> usize {
        self.carried - self.collisions
    }
}

// ── Escalator ─────────────────────────────────────────────────────────────────

/// A multi-lane escalator.
///
/// Cells are stored lane-major in one flat `Vec`: cell `(lane, pos)` lives at
/// `lane * length + pos`.  The vector always holds exactly
/// `lane_count * length` cells.
///
/// Single-threaded: all operations take `&mut self` and run to completion.
/// Share across threads only behind external synchronisation.
pub struct Escalator<P: Occupant, H: EscalatorHooks<P> = NoopHooks> {
    length:        usize,
    lane_count:    usize,
    belt_velocity: f64,
    cells:         Vec<Option<P>>,
    hooks:         H,
}

impl<P: Occupant, H: EscalatorHooks<P>> Escalator<P, H> {
    /// Build an escalator with every cell empty.
    ///
    /// Fails with [`EscalatorError::InvalidConfiguration`] if `length` or
    /// `lane_count` is zero, or `belt_velocity` is negative or not finite.
    pub fn new(config: &EscalatorConfig, hooks: H) -> EscalatorResult<Self> {
        if config.length == 0 {
            return Err(EscalatorError::InvalidConfiguration("length must be positive".into()));
        }
        if config.lane_count == 0 {
            return Err(EscalatorError::InvalidConfiguration("lane_count must be positive".into()));
        }
        if LaneId::try_from(config.lane_count).is_err() {
            return Err(EscalatorError::InvalidConfiguration(format!(
                "lane_count {} exceeds the lane id range",
                config.lane_count
            )));
        }
        if !config.belt_velocity.is_finite() || config.belt_velocity < 0.0 {
            return Err(EscalatorError::InvalidConfiguration(format!(
                "belt_velocity must be a non-negative number, got {}",
                config.belt_velocity
            )));
        }
        let cell_count = config.length.checked_mul(config.lane_count).ok_or_else(|| {
            EscalatorError::InvalidConfiguration(format!(
                "{} lanes of {} cells overflow the grid",
                config.lane_count, config.length
            ))
        })?;

        Ok(Self {
            length:        config.length,
            lane_count:    config.lane_count,
            belt_velocity: config.belt_velocity,
            cells:         empty_cells(cell_count),
            hooks,
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[inline]
    pub fn belt_velocity(&self) -> f64 {
        self.belt_velocity
    }

    /// The configuration this escalator was built from.
    pub fn config(&self) -> EscalatorConfig {
        EscalatorConfig {
            length:        self.length,
            lane_count:    self.lane_count,
            belt_velocity: self.belt_velocity,
        }
    }

    /// Entry-slot state of every lane, keyed by lane.
    ///
    /// `Full` for lane `i` exactly when cell 0 of lane `i` is occupied.
    pub fn entry_state(&self) -> BTreeMap<LaneId, EntryState> {
        self.cells
            .chunks_exact(self.length)
            .enumerate()
            .map(|(lane, cells)| {
                let state = if cells[0].is_some() { EntryState::Full } else { EntryState::Empty };
                (LaneId(lane as u32), state)
            })
            .collect()
    }

    /// The occupant at `position` of `lane`, if any.  Out-of-range
    /// coordinates return `None`.
    pub fn occupant_at(&self, lane: usize, position: usize) -> Option<&P> {
        if lane >= self.lane_count || position >= self.length {
            return None;
        }
        self.cells[lane * self.length + position].as_ref()
    }

    /// All cells of one lane, bottom first.
    pub fn lane_cells(&self, lane: usize) -> Option<&[Option<P>]> {
        self.cells.chunks_exact(self.length).nth(lane)
    }

    /// Iterate over every lane's cells, lane 0 first.
    pub fn lanes(&self) -> impl Iterator<Item = &[Option<P>]> {
        self.cells.chunks_exact(self.length)
    }

    /// Iterate over `(lane, position, occupant)` for every occupied cell in
    /// lane-major, bottom-first order.
    pub fn occupants(&self) -> impl Iterator<Item = (LaneId, usize, &P)> {
        let length = self.length;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|p| (LaneId((i / length) as u32), i % length, p))
        })
    }

    /// Where the occupant with `id` currently is.
    pub fn position_of(&self, id: PersonId) -> Option<(LaneId, usize)> {
        self.occupants()
            .find(|(_, _, p)| p.id() == id)
            .map(|(lane, pos, _)| (lane, pos))
    }

    pub fn occupant_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[inline]
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Consume the escalator and return its hooks.  Remaining occupants are
    /// dropped.
    pub fn into_hooks(self) -> H {
        self.hooks
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Try to place `occupant` in cell 0 of `lane`.
    ///
    /// Fails with [`EscalatorError::InvalidArgument`] if `lane` is negative
    /// or `>= lane_count`, before touching the grid.  If cell 0 is occupied
    /// the occupant comes back as [`Admission::Rejected`] and nothing
    /// changes.  Otherwise the occupant is placed, `on_enter` runs, and
    /// [`Admission::Admitted`] is returned.
    pub fn add_person(&mut self, occupant: P, lane: i64) -> EscalatorResult<Admission<P>> {
        if lane < 0 {
            return Err(EscalatorError::InvalidArgument {
                lane,
                reason: "lane must be non-negative",
            });
        }
        let lane_idx = usize::try_from(lane)
            .ok()
            .filter(|&l| l < self.lane_count)
            .ok_or(EscalatorError::InvalidArgument {
                lane,
                reason: "lane must be less than lane_count",
            })?;

        let slot = &mut self.cells[lane_idx * self.length];
        if slot.is_some() {
            debug!(lane = lane_idx, person = %occupant.id(), "entry slot full; admission rejected");
            return Ok(Admission::Rejected(occupant));
        }

        let occupant = slot.insert(occupant);
        debug!(lane = lane_idx, person = %occupant.id(), "person boarded");
        self.hooks.on_enter(LaneId(lane_idx as u32), occupant);
        Ok(Admission::Admitted)
    }

    /// Advance every occupant by one tick.
    ///
    /// Lanes are processed independently, each bottom to top.  An occupant at
    /// `pos` moves to `pos + floor(belt_velocity + speed)` in a freshly
    /// allocated grid; if that index is past the top it exits instead.  When
    /// two occupants land on the same cell the later-processed one (higher
    /// starting position) wins.
    ///
    /// The new grid replaces the old one before `on_exit` runs for the exits,
    /// in processing order.  A panicking hook therefore leaves the escalator
    /// fully stepped; exits after the panicking one are dropped.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let mut next = empty_cells(self.cells.len());
        let mut exits = Vec::new();

        for (index, cell) in self.cells.iter_mut().enumerate() {
            let Some(occupant) = cell.take() else { continue };
            let lane = index / self.length;
            let pos = index % self.length;
            let next_pos = pos.saturating_add(displacement(self.belt_velocity, occupant.speed()));

            if next_pos >= self.length {
                report.exited += 1;
                debug!(lane, from = pos, person = %occupant.id(), "person exited");
                exits.push((LaneId(lane as u32), occupant));
                continue;
            }

            report.carried += 1;
            let arriving = occupant.id();
            if let Some(lost) = next[lane * self.length + next_pos].replace(occupant) {
                report.collisions += 1;
                warn!(
                    lane,
                    position = next_pos,
                    kept = %arriving,
                    lost = %lost.id(),
                    "two occupants landed on one cell; earlier occupant dropped"
                );
            }
        }

        // The new grid is committed before any hook runs.
        self.cells = next;
        for (lane, occupant) in exits {
            self.hooks.on_exit(lane, occupant);
        }

        report
    }
}

impl<P: Occupant> Escalator<P, NoopHooks> {
    /// Build an escalator with no enter/exit callbacks.
    pub fn without_hooks(config: &EscalatorConfig) -> EscalatorResult<Self> {
        Self::new(config, NoopHooks)
    }
}

/// Cells moved per step for an occupant walking at `speed` on a belt moving
/// at `belt_velocity`.
///
/// Truncates, so a combined speed of 1.9 moves one cell.  A negative or
/// non-finite sum moves nobody.
#[inline]
fn displacement(belt_velocity: f64, speed: f64) -> usize {
    let combined = belt_velocity + speed;
    if combined.is_finite() && combined > 0.0 {
        combined.floor() as usize
    } else {
        0
    }
}

fn empty_cells<P>(n: usize) -> Vec<Option<P>> {
    std::iter::repeat_with(|| None).take(n).collect()
}
