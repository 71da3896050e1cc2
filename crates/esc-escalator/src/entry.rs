//! Entry-slot types: the per-lane gate state and the admission outcome.

use std::fmt;

/// Whether cell 0 of a lane can take a new occupant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EntryState {
    Empty,
    Full,
}

impl EntryState {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == EntryState::Empty
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryState::Empty => f.write_str("EMPTY"),
            EntryState::Full => f.write_str("FULL"),
        }
    }
}

/// Outcome of [`Escalator::add_person`][crate::Escalator::add_person].
///
/// A full entry slot is backpressure, not an error: the occupant is handed
/// back so the caller can retry on a later tick.
#[must_use]
#[derive(Debug, PartialEq)]
pub enum Admission<P> {
    /// The occupant now sits in cell 0 of the requested lane.
    Admitted,
    /// Cell 0 was occupied.  The grid is unchanged.
    Rejected(P),
}

impl<P> Admission<P> {
    #[inline]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    /// The returned occupant, if the admission was rejected.
    pub fn into_rejected(self) -> Option<P> {
        match self {
            Admission::Admitted => None,
            Admission::Rejected(p) => Some(p),
        }
    }
}
