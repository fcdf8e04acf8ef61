//! Per-cell session state.

use numera_core::{Digit, DigitSet};

/// The state of one board cell during a session.
///
/// A cell is exactly one of: empty, a given (pre-filled by the puzzle
/// and immutable to the player), a player-entered value, or a set of
/// candidate annotations. Holding a value and holding annotations are
/// therefore mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// No value and no annotations.
    #[default]
    Empty,
    /// A digit pre-filled by the puzzle; never mutated by play.
    Given(Digit),
    /// A digit entered by the player.
    Filled(Digit),
    /// Candidate annotations entered by the player; never empty.
    Notes(DigitSet),
}

impl CellState {
    /// Returns the decided digit of this cell, whether given or
    /// player-entered.
    #[must_use]
    pub const fn as_digit(self) -> Option<Digit> {
        match self {
            Self::Given(digit) | Self::Filled(digit) => Some(digit),
            Self::Empty | Self::Notes(_) => None,
        }
    }

    /// Returns the annotation set of this cell, empty unless the cell
    /// is in the annotations state.
    #[must_use]
    pub const fn notes(self) -> DigitSet {
        match self {
            Self::Notes(notes) => notes,
            Self::Empty | Self::Given(_) | Self::Filled(_) => DigitSet::EMPTY,
        }
    }

    /// Returns whether this cell is a given.
    #[must_use]
    pub const fn is_given(self) -> bool {
        matches!(self, Self::Given(_))
    }

    /// Returns whether this cell holds a player-entered value.
    #[must_use]
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled(_))
    }

    /// Returns whether this cell is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}
