//! Plain data row types written by output backends.

use esc_sim::TickSummary;

/// One occupied cell at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyRow {
    pub tick:      u64,
    pub lane:      u32,
    pub position:  u32,
    pub person_id: u32,
}

/// Counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub arrivals:   u64,
    pub admitted:   u64,
    pub rejected:   u64,
    pub exited:     u64,
    pub collisions: u64,
    pub queued:     u64,
    pub on_board:   u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:       s.tick.0,
            arrivals:   s.arrivals as u64,
            admitted:   s.admitted as u64,
            rejected:   s.rejected as u64,
            exited:     s.exited as u64,
            collisions: s.collisions as u64,
            queued:     s.queued as u64,
            on_board:   s.on_board as u64,
        }
    }
}
