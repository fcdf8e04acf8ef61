//! Puzzle data and validation.

use derive_more::{Display, Error};
use numera_core::{DigitGrid, House, Position, has_duplicate};

/// A validation failure for a loaded puzzle.
///
/// Coordinates are 1-based for human-facing messages. Validation scans
/// in a fixed order (givens/solution agreement in row-major order,
/// solution completeness, then duplicates over rows, columns, boxes),
/// so the first reported failure is deterministic for a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// A given digit contradicts the solution at the same cell.
    #[display("given at row {row}, column {col} contradicts the solution")]
    GivenSolutionMismatch {
        /// 1-based row of the offending cell.
        row: u8,
        /// 1-based column of the offending cell.
        col: u8,
    },
    /// The solution grid has an empty cell.
    #[display("solution is missing a digit at row {row}, column {col}")]
    IncompleteSolution {
        /// 1-based row of the empty cell.
        row: u8,
        /// 1-based column of the empty cell.
        col: u8,
    },
    /// A digit appears twice among the givens of one row.
    #[display("duplicate given in row {row}")]
    RowDuplicate {
        /// 1-based row index.
        row: u8,
    },
    /// A digit appears twice among the givens of one column.
    #[display("duplicate given in column {col}")]
    ColumnDuplicate {
        /// 1-based column index.
        col: u8,
    },
    /// A digit appears twice among the givens of one box.
    #[display("duplicate given in box {index}")]
    BoxDuplicate {
        /// 1-based box index (left to right, top to bottom).
        index: u8,
    },
}

/// An immutable, validated `(givens, solution)` pair.
///
/// Construction runs validation exactly once; a `Puzzle` value is proof
/// that its givens agree with its solution, that the solution is
/// complete, and that the givens contain no duplicate within any house.
/// Puzzles come pre-made from an external catalog; this engine neither
/// generates nor solves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    givens: DigitGrid,
    solution: DigitGrid,
}

impl Puzzle {
    /// Validates and creates a puzzle.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, in the fixed
    /// scan order documented on the error type.
    pub fn new(givens: DigitGrid, solution: DigitGrid) -> Result<Self, ValidationError> {
        validate(&givens, &solution)?;
        Ok(Self { givens, solution })
    }

    /// Returns the given (pre-filled) cells.
    #[must_use]
    pub fn givens(&self) -> &DigitGrid {
        &self.givens
    }

    /// Returns the solution grid.
    #[must_use]
    pub fn solution(&self) -> &DigitGrid {
        &self.solution
    }

    /// Consumes the puzzle and returns its grids.
    #[must_use]
    pub fn into_parts(self) -> (DigitGrid, DigitGrid) {
        (self.givens, self.solution)
    }
}

fn validate(givens: &DigitGrid, solution: &DigitGrid) -> Result<(), ValidationError> {
    // Givens must agree with the solution, first mismatch in row-major
    // order wins.
    for pos in Position::ALL {
        if let Some(given) = givens.get(pos)
            && solution.get(pos) != Some(given)
        {
            return Err(ValidationError::GivenSolutionMismatch {
                row: pos.y() + 1,
                col: pos.x() + 1,
            });
        }
    }

    for pos in Position::ALL {
        if solution.get(pos).is_none() {
            return Err(ValidationError::IncompleteSolution {
                row: pos.y() + 1,
                col: pos.x() + 1,
            });
        }
    }

    for y in 0..9 {
        if house_has_duplicate(givens, House::Row { y }) {
            return Err(ValidationError::RowDuplicate { row: y + 1 });
        }
    }
    for x in 0..9 {
        if house_has_duplicate(givens, House::Column { x }) {
            return Err(ValidationError::ColumnDuplicate { col: x + 1 });
        }
    }
    for index in 0..9 {
        if house_has_duplicate(givens, House::Box { index }) {
            return Err(ValidationError::BoxDuplicate { index: index + 1 });
        }
    }

    Ok(())
}

fn house_has_duplicate(grid: &DigitGrid, house: House) -> bool {
    has_duplicate(house.positions().into_iter().map(|pos| grid.get(pos)))
}
