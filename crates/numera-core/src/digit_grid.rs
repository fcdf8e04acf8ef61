//! A 9×9 grid of optional digits.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use derive_more::{Display as DeriveDisplay, Error};

use crate::{Digit, Position};

/// A 9×9 grid where every cell holds an optional digit.
///
/// The grid has an 81-character row-major text form: `'1'`-`'9'` for
/// digits, `'0'` or `'.'` for empty cells on parse, `'0'` on display.
/// This is the interchange format used by puzzle catalogs.
///
/// # Examples
///
/// ```
/// use numera_core::{Digit, DigitGrid, Position};
///
/// let mut grid = DigitGrid::new();
/// grid.set(Position::new(0, 0), Some(Digit::D5));
/// assert_eq!(grid[Position::new(0, 0)], Some(Digit::D5));
///
/// let text = grid.to_string();
/// assert_eq!(text.len(), 81);
/// assert_eq!(text.parse::<DigitGrid>().unwrap(), grid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitGrid {
    cells: [Option<Digit>; 81],
}

impl Default for DigitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Returns the digit at `pos`, or `None` if the cell is empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.cell_index()]
    }

    /// Sets the cell at `pos`.
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos.cell_index()] = digit;
    }

    /// Returns whether every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Index<Position> for DigitGrid {
    type Output = Option<Digit>;

    fn index(&self, pos: Position) -> &Option<Digit> {
        &self.cells[pos.cell_index()]
    }
}

/// An error parsing the 81-character grid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveDisplay, Error)]
pub enum GridParseError {
    /// The input did not contain exactly 81 cell characters.
    #[display("expected 81 cells, found {len}")]
    BadLength {
        /// Number of cell characters found.
        len: usize,
    },
    /// A character was not a digit, `'0'`, or `'.'`.
    #[display("invalid cell character {c:?} at offset {offset}")]
    BadCell {
        /// The offending character.
        c: char,
        /// Row-major offset of the offending character.
        offset: usize,
    },
}

impl FromStr for DigitGrid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, GridParseError> {
        let mut cells = [None; 81];
        let mut len = 0;
        for (offset, c) in s.chars().enumerate() {
            if len >= 81 {
                return Err(GridParseError::BadLength { len: len + 1 });
            }
            cells[len] = match c {
                '0' | '.' => None,
                '1'..='9' => {
                    #[expect(clippy::cast_possible_truncation)]
                    let value = c.to_digit(10).unwrap_or_default() as u8;
                    Digit::try_from_value(value)
                }
                _ => return Err(GridParseError::BadCell { c, offset }),
            };
            len += 1;
        }
        if len != 81 {
            return Err(GridParseError::BadLength { len });
        }
        Ok(Self { cells })
    }
}

impl Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, "0")?,
            }
        }
        Ok(())
    }
}
