//! The hint subsystem.
//!
//! Two strategies reveal the solution digit of the selected cell:
//!
//! - [`reveal_plain`] places the digit and nothing else.
//! - [`reveal_safe`] first clears wrong duplicates of that digit from
//!   the selected cell's row, column, and box, so the reveal never
//!   creates an immediately visible contradiction next to itself.
//!
//! Both strategies require a selection on a non-given cell and are
//! disabled (no-ops) in timed challenge sessions.

use derive_more::{Display, Error};
use numera_core::{Digit, House, Position};

use crate::{CellState, Session};

/// A hint failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum HintError {
    /// The solution digit for the selected cell already sits in a given
    /// cell of the same row, column, or box. This is a defect in the
    /// source puzzle data, not a player error, and is surfaced verbatim
    /// so it can be reported; the board is left unmodified.
    #[display("solution digit collides with a given cell in the same unit")]
    DataConflict,
}

/// Which reveal strategy the engine applies by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintPolicy {
    /// Reveal the digit without touching other cells.
    Plain,
    /// Clear conflicting wrong entries before revealing.
    #[default]
    AutoCorrect,
}

/// Hint strategy dispatcher.
///
/// Both strategies stay callable by name ([`reveal_plain`],
/// [`reveal_safe`]); the engine only decides which one a generic
/// "hint" request maps to.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintEngine {
    policy: HintPolicy,
}

impl HintEngine {
    /// Creates a hint engine with the given policy.
    #[must_use]
    pub const fn new(policy: HintPolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(self) -> HintPolicy {
        self.policy
    }

    /// Applies the configured reveal strategy to the session.
    ///
    /// Returns the number of auto-cleared cells (always 0 under
    /// [`HintPolicy::Plain`]).
    ///
    /// # Errors
    ///
    /// Returns [`HintError::DataConflict`] under
    /// [`HintPolicy::AutoCorrect`] when the puzzle data is internally
    /// inconsistent; see [`reveal_safe`].
    pub fn reveal(self, session: &mut Session) -> Result<usize, HintError> {
        match self.policy {
            HintPolicy::Plain => {
                reveal_plain(session);
                Ok(0)
            }
            HintPolicy::AutoCorrect => reveal_safe(session),
        }
    }
}

/// Reveals the solution digit of the selected cell.
///
/// Returns whether a digit was placed. No-op (returning `false`) when
/// the session is timed, nothing is selected, or the selection is a
/// given cell.
pub fn reveal_plain(session: &mut Session) -> bool {
    let Some((pos, target)) = reveal_target(session) else {
        return false;
    };
    session.cells[pos.cell_index()] = CellState::Filled(target);
    true
}

/// Reveals the solution digit of the selected cell, clearing wrong
/// duplicates of that digit from the same row, column, and box first.
///
/// A wrong duplicate is a non-given cell whose entered value equals the
/// digit about to be revealed while its own solution digit differs.
/// Cleared cells lose their value and annotations. Returns the number
/// of cells cleared; 0 with no mutation when the session is timed,
/// nothing is selected, or the selection is a given cell.
///
/// # Errors
///
/// Returns [`HintError::DataConflict`], without mutating anything, when
/// a given cell in the same row, column, or box already holds the
/// digit to be revealed. That means the loaded puzzle and solution
/// disagree with each other.
pub fn reveal_safe(session: &mut Session) -> Result<usize, HintError> {
    let Some((pos, target)) = reveal_target(session) else {
        return Ok(0);
    };

    for house in House::containing(pos) {
        for peer in house.positions() {
            if peer != pos && session.cells[peer.cell_index()] == CellState::Given(target) {
                return Err(HintError::DataConflict);
            }
        }
    }

    let mut cleared = 0;
    for house in House::containing(pos) {
        for peer in house.positions() {
            if peer == pos {
                continue;
            }
            // A cell on a row/box intersection is visited twice; once
            // cleared it is no longer Filled, so it cannot be counted
            // again.
            if let CellState::Filled(digit) = session.cells[peer.cell_index()]
                && digit == target
                && session.solution.get(peer) != Some(target)
            {
                session.cells[peer.cell_index()] = CellState::Empty;
                cleared += 1;
            }
        }
    }

    session.cells[pos.cell_index()] = CellState::Filled(target);
    Ok(cleared)
}

fn reveal_target(session: &Session) -> Option<(Position, Digit)> {
    if session.meta.timed {
        return None;
    }
    let pos = session.selection?;
    if session.cells[pos.cell_index()].is_given() {
        return None;
    }
    let target = session.solution.get(pos)?;
    Some((pos, target))
}
