//! `esc-core` — foundational types for the escalator simulator.
//!
//! This crate is a dependency of every other `esc-*` crate.  It has no
//! `esc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `PersonId`, `LaneId`                                       |
//! | [`time`]        | `Tick`, `SimClock`                                         |
//! | [`config`]      | `EscalatorConfig`, `ArrivalConfig`, `LanePolicy`, `SimConfig` |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                           |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalConfig, EscalatorConfig, LanePolicy, SimConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{LaneId, PersonId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
