//! Move representation: a source pile and a destination pile.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A place a card can come from or go to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// The next undrawn card of the shared deck.
    Deck,
    /// Foundation pile by index (0..4, base card index + 1).
    Foundation(u8),
    /// Waste pile by index (0..4).
    Waste(u8),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Deck => write!(f, "D"),
            Location::Foundation(i) => write!(f, "F{i}"),
            Location::Waste(i) => write!(f, "W{i}"),
        }
    }
}

/// One card transfer.
///
/// Only three shapes are ever legal: deck to foundation, deck to waste and
/// waste to foundation. Other shapes can be built but `Board::apply`
/// rejects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Move {
    #[must_use]
    pub const fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn draw_to_foundation(foundation: usize) -> Self {
        Self::new(Location::Deck, Location::Foundation(foundation as u8))
    }

    #[must_use]
    pub const fn draw_to_waste(waste: usize) -> Self {
        Self::new(Location::Deck, Location::Waste(waste as u8))
    }

    #[must_use]
    pub const fn waste_to_foundation(waste: usize, foundation: usize) -> Self {
        Self::new(Location::Waste(waste as u8), Location::Foundation(foundation as u8))
    }

    /// Whether this move builds on a foundation.
    #[must_use]
    pub fn is_foundation_move(&self) -> bool {
        matches!(self.to, Location::Foundation(_))
    }

    /// Whether this move parks the drawn card on a waste pile.
    #[must_use]
    pub fn is_waste_placement(&self) -> bool {
        matches!(self.to, Location::Waste(_))
    }

    #[must_use]
    pub fn draws(&self) -> bool {
        self.from == Location::Deck
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.from, self.to)
    }
}

/// Move list for one board. A board never has more than 24 legal moves.
pub type Moves = SmallVec<[Move; 16]>;
