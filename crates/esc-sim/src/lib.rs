//! `esc-sim` — tick loop driver for the escalator simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Step     — Escalator::step moves every rider; riders past the top
//!                 exit and are logged as completed trips.
//!   ② Arrive   — the ArrivalModel produces new people at the bottom
//!                 landing; each joins the back of the boarding queue.
//!   ③ Board    — every queued person gets one admission attempt, front to
//!                 back.  Rejected people keep their place in the queue.
//!   ④ Observe  — on_tick_end with a TickSummary, plus an occupancy
//!                 snapshot every `output_interval_ticks`.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use esc_core::SimConfig;
//! use esc_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::from_config(SimConfig::default()).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{} riders completed", sim.trips().len());
//! ```

pub mod arrival;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod trips;


pub use arrival::{ArrivalModel, BernoulliArrivals, NoArrivals, ScriptedArrivals};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::{Sim, SimEscalator, Waiting};
pub use trips::{TripLog, TripRecord};
