//! Board coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on the 9×9 board.
///
/// `x` is the column (0-8, left to right) and `y` is the row (0-8, top
/// to bottom). Cells are also addressable by their row-major index 0-80
/// via [`Position::cell_index`].
///
/// # Examples
///
/// ```
/// use numera_core::Position;
///
/// let pos = Position::new(4, 2);
/// assert_eq!(pos.x(), 4);
/// assert_eq!(pos.y(), 2);
/// assert_eq!(pos.cell_index(), 22);
/// assert_eq!(pos.box_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// All board positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { x: 0, y: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self {
                x: (i % 9) as u8,
                y: (i / 9) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position from column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in the range 0-8.
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        assert!(x < 9 && y < 9, "position out of range: ({x}, {y})");
        Self { x, y }
    }

    /// Creates a position from a box index (0-8) and a cell index within
    /// that box (0-8, row-major within the box).
    ///
    /// # Panics
    ///
    /// Panics if `box_index` or `cell` is not in the range 0-8.
    #[must_use]
    pub fn from_box(box_index: u8, cell: u8) -> Self {
        assert!(box_index < 9 && cell < 9);
        Self {
            x: (box_index % 3) * 3 + cell % 3,
            y: (box_index / 3) * 3 + cell / 3,
        }
    }

    /// Creates a position from a row-major cell index (0-80).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub fn from_cell_index(index: usize) -> Self {
        assert!(index < 81, "cell index out of range: {index}");
        Self::ALL[index]
    }

    /// Returns the column (0-8).
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row (0-8).
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the index (0-8) of the 3×3 box containing this position.
    ///
    /// Boxes are numbered left to right, top to bottom.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.y / 3) * 3 + self.x / 3
    }

    /// Returns the row-major cell index (0-80) of this position.
    #[must_use]
    pub const fn cell_index(self) -> usize {
        self.y as usize * 9 + self.x as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        assert_eq!(Position::ALL[0], Position::new(0, 0));
        assert_eq!(Position::ALL[8], Position::new(8, 0));
        assert_eq!(Position::ALL[9], Position::new(0, 1));
        assert_eq!(Position::ALL[80], Position::new(8, 8));
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.cell_index(), i);
            assert_eq!(Position::from_cell_index(i), *pos);
        }
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(4, 1).box_index(), 1);
        assert_eq!(Position::new(8, 2).box_index(), 2);
        assert_eq!(Position::new(2, 3).box_index(), 3);
        assert_eq!(Position::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_from_box_round_trip() {
        for box_index in 0..9 {
            for cell in 0..9 {
                let pos = Position::from_box(box_index, cell);
                assert_eq!(pos.box_index(), box_index);
            }
        }
    }

    #[test]
    #[should_panic(expected = "position out of range")]
    fn test_new_out_of_range_panics() {
        let _ = Position::new(9, 0);
    }
}
