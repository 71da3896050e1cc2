//! `esc-escalator` — the escalator state-transition engine.
//!
//! An [`Escalator`] is a fixed set of parallel lanes, each a fixed-length row
//! of cells holding at most one occupant.  Callers drive it with three
//! operations:
//!
//! | Operation                      | Effect                                          |
//! |--------------------------------|-------------------------------------------------|
//! | [`Escalator::entry_state`]     | Which lanes can take a new occupant right now   |
//! | [`Escalator::add_person`]      | Place an occupant in cell 0 of a lane, if free  |
//! | [`Escalator::step`]            | Advance every occupant by one tick              |
//!
//! # Movement model
//!
//! Each step every occupant moves `floor(belt_velocity + speed)` cells up its
//! own lane.  Occupants whose next index reaches the lane length leave the
//! escalator and are handed to [`EscalatorHooks::on_exit`].  The next grid is
//! built from scratch each step, so reads and writes within one step never
//! alias.  Two occupants landing on the same cell in one step resolve as
//! last-writer-wins: the occupant from the higher starting cell keeps the
//! cell and the other is dropped.  [`StepReport::collisions`] counts these.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`escalator`]   | `Escalator<P, H>`, `StepReport`                           |
//! | [`occupant`]    | `Occupant` capability trait, stock `Person`               |
//! | [`entry`]       | `EntryState`, `Admission<P>`                              |
//! | [`hooks`]       | `EscalatorHooks<P>`, `NoopHooks`, `Callbacks<P>`          |
//! | [`error`]       | `EscalatorError`, `EscalatorResult<T>`                    |

pub mod entry;
pub mod error;
pub mod escalator;
pub mod hooks;
pub mod occupant;

#[cfg(test)]
mod tests;

pub use entry::{Admission, EntryState};
pub use error::{EscalatorError, EscalatorResult};
pub use escalator::{Escalator, StepReport};
pub use hooks::{Callbacks, EscalatorHooks, NoopHooks};
pub use occupant::{Occupant, Person};
