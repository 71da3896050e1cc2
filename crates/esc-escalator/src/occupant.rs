//! The occupant capability and the stock `Person` type.

use esc_core::PersonId;

/// Anything that can ride the escalator.
///
/// The escalator only reads the walking speed (cells per tick, added to the
/// belt velocity) and the identity (for logging).  Occupants are moved into
/// the grid by value, so one occupant can never sit in two cells.
pub trait Occupant {
    fn id(&self) -> PersonId;

    /// Individual walking speed in cells per tick.  Expected non-negative.
    fn speed(&self) -> f64;
}

impl<T: Occupant + ?Sized> Occupant for Box<T> {
    #[inline]
    fn id(&self) -> PersonId {
        (**self).id()
    }

    #[inline]
    fn speed(&self) -> f64 {
        (**self).speed()
    }
}

/// A person with a fixed walking speed.  `speed = 0.0` stands still and lets
/// the belt carry them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id:    PersonId,
    pub speed: f64,
}

impl Person {
    pub fn new(id: PersonId, speed: f64) -> Self {
        Self { id, speed }
    }

    /// A person who stands on the belt without walking.
    pub fn standing(id: PersonId) -> Self {
        Self::new(id, 0.0)
    }
}

impl Occupant for Person {
    #[inline]
    fn id(&self) -> PersonId {
        self.id
    }

    #[inline]
    fn speed(&self) -> f64 {
        self.speed
    }
}
