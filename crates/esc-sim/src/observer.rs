//! Simulation observer trait for progress reporting and data collection.

use esc_core::Tick;

use crate::SimEscalator;

/// Counts for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:       Tick,
    /// People who reached the bottom landing this tick.
    pub arrivals:   usize,
    /// Boarding attempts that succeeded.
    pub admitted:   usize,
    /// Boarding attempts refused because the entry slot was full.
    pub rejected:   usize,
    /// Riders who left the top.
    pub exited:     usize,
    /// Riders dropped by a same-cell collision.
    pub collisions: usize,
    /// People still waiting at the bottom after boarding.
    pub queued:     usize,
    /// Riders on the escalator at the end of the tick.
    pub on_board:   usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} on board", summary.tick, summary.on_board);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's counts.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the grid.
    fn on_snapshot(&mut self, _tick: Tick, _escalator: &SimEscalator) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
