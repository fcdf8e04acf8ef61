//! Houses (rows, columns, and 3×3 boxes) and the no-duplicate rule.

use crate::{Digit, DigitSet, Position};

/// A house: one row, one column, or one 3×3 box of the board.
///
/// Houses are the structures subject to the no-duplicate rule. The
/// canonical iteration order everywhere in the engine is rows, then
/// columns, then boxes, so that scans over houses are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to
    /// bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// All rows (0-8).
    pub const ROWS: [Self; 9] = {
        let mut rows = [Self::Row { y: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            rows[i] = Self::Row { y: i as u8 };
            i += 1;
        }
        rows
    };

    /// All columns (0-8).
    pub const COLUMNS: [Self; 9] = {
        let mut columns = [Self::Column { x: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            columns[i] = Self::Column { x: i as u8 };
            i += 1;
        }
        columns
    };

    /// All boxes (0-8).
    pub const BOXES: [Self; 9] = {
        let mut boxes = [Self::Box { index: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            boxes[i] = Self::Box { index: i as u8 };
            i += 1;
        }
        boxes
    };

    /// All houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { y: i as u8 };
            all[i + 9] = Self::Column { x: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the three houses containing `pos`, in row, column, box
    /// order.
    #[must_use]
    pub const fn containing(pos: Position) -> [Self; 3] {
        [
            Self::Row { y: pos.y() },
            Self::Column { x: pos.x() },
            Self::Box {
                index: pos.box_index(),
            },
        ]
    }

    /// Converts a cell index within the house (0-8) into an absolute
    /// [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    pub fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            Self::Row { y } => Position::new(i, y),
            Self::Column { x } => Position::new(x, i),
            Self::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns the nine positions contained in this house.
    #[must_use]
    pub fn positions(self) -> [Position; 9] {
        let mut positions = [Position::new(0, 0); 9];
        for (i, slot) in (0u8..).zip(&mut positions) {
            *slot = self.position_from_cell_index(i);
        }
        positions
    }
}

/// Returns whether any digit appears more than once in `values`.
///
/// Empty cells (`None`) never count as duplicates.
///
/// # Examples
///
/// ```
/// use numera_core::{Digit, has_duplicate};
///
/// assert!(!has_duplicate([Some(Digit::D1), None, Some(Digit::D2)]));
/// assert!(has_duplicate([Some(Digit::D1), None, Some(Digit::D1)]));
/// ```
#[must_use]
pub fn has_duplicate<I>(values: I) -> bool
where
    I: IntoIterator<Item = Option<Digit>>,
{
    let mut seen = DigitSet::EMPTY;
    for digit in values.into_iter().flatten() {
        if seen.contains(digit) {
            return true;
        }
        seen.insert(digit);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_positions() {
        let positions = House::Row { y: 2 }.positions();
        for (x, pos) in positions.iter().enumerate() {
            assert_eq!(*pos, Position::new(u8::try_from(x).unwrap(), 2));
        }
    }

    #[test]
    fn test_column_positions() {
        let positions = House::Column { x: 7 }.positions();
        for (y, pos) in positions.iter().enumerate() {
            assert_eq!(*pos, Position::new(7, u8::try_from(y).unwrap()));
        }
    }

    #[test]
    fn test_box_positions() {
        let positions = House::Box { index: 4 }.positions();
        assert_eq!(positions[0], Position::new(3, 3));
        assert_eq!(positions[4], Position::new(4, 4));
        assert_eq!(positions[8], Position::new(5, 5));
        for pos in positions {
            assert_eq!(pos.box_index(), 4);
        }
    }

    #[test]
    fn test_containing_covers_position() {
        for pos in [Position::new(0, 0), Position::new(4, 7), Position::new(8, 8)] {
            let houses = House::containing(pos);
            assert!(matches!(houses[0], House::Row { .. }));
            assert!(matches!(houses[1], House::Column { .. }));
            assert!(matches!(houses[2], House::Box { .. }));
            for house in houses {
                assert!(house.positions().contains(&pos));
            }
        }
    }

    #[test]
    fn test_all_order() {
        assert!(matches!(House::ALL[0], House::Row { y: 0 }));
        assert!(matches!(House::ALL[9], House::Column { x: 0 }));
        assert!(matches!(House::ALL[18], House::Box { index: 0 }));
        assert_eq!(House::ALL.len(), 27);
    }

    #[test]
    fn test_has_duplicate() {
        assert!(!has_duplicate([None; 9]));
        assert!(!has_duplicate(
            Digit::ALL.into_iter().map(Some).collect::<Vec<_>>()
        ));
        assert!(has_duplicate([
            Some(Digit::D1),
            None,
            Some(Digit::D2),
            Some(Digit::D1),
        ]));
    }
}
