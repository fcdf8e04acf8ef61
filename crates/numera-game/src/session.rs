//! The play-session state machine.

use derive_more::{Display, Error};
use numera_core::{Digit, DigitGrid, DigitSet, Position};

use crate::{CellState, Puzzle};

/// How digit input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Digit input sets the cell's value.
    #[default]
    Value,
    /// Digit input toggles a candidate annotation.
    Annotate,
}

impl EntryMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Value => Self::Annotate,
            Self::Annotate => Self::Value,
        }
    }
}

/// What a mutating session operation did.
///
/// Player-facing operations never fail: when a precondition is unmet
/// (no selection, or the selected cell is a given) the operation
/// reports [`InputOperation::NoOp`] and leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOperation {
    /// A value or annotation was set.
    Set,
    /// A value or annotation was removed.
    Removed,
    /// Nothing changed.
    NoOp,
}

/// Session metadata carried alongside the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionMeta {
    /// Difficulty tier label the puzzle was loaded from.
    pub difficulty: String,
    /// 1-based index of the puzzle within its tier.
    pub index: u32,
    /// Whether this is a timed challenge session. Hints are disabled
    /// when set, and a solve is eligible for the leaderboard.
    pub timed: bool,
}

/// A failure restoring a session from saved data.
///
/// These indicate saved data that contradicts the puzzle it claims to
/// belong to; callers treat them as "no usable saved session".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RestoreError {
    /// A saved player value lands on a given cell.
    #[display("saved value collides with a given cell")]
    GivenOverwrite,
    /// Saved annotations land on a cell that holds a value.
    #[display("saved annotations collide with a value cell")]
    NoteBesideValue,
}

/// A live play session over one validated [`Puzzle`].
///
/// The session owns the board (given cells, player values, candidate
/// annotations), the selection cursor, the entry mode, and the session
/// metadata. All player-facing mutations go through this type; given
/// cells are never mutated by any of them.
///
/// # Examples
///
/// ```
/// use numera_core::{Digit, DigitGrid, Position};
/// use numera_game::{EntryMode, Puzzle, Session, SessionMeta};
///
/// let givens: DigitGrid = format!("123456789{}", "0".repeat(72)).parse()?;
/// let solution: DigitGrid =
///     "123456789456789123789123456231564897564897231897231564312645978645978312978312645"
///         .parse()?;
/// let puzzle = Puzzle::new(givens, solution)?;
/// let mut session = Session::new(puzzle, SessionMeta::default());
///
/// session.select(Position::new(0, 1));
/// session.input(Digit::D4);
/// assert_eq!(session.cell(Position::new(0, 1)).as_digit(), Some(Digit::D4));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) cells: [CellState; 81],
    pub(crate) solution: DigitGrid,
    pub(crate) selection: Option<Position>,
    pub(crate) mode: EntryMode,
    pub(crate) meta: SessionMeta,
}

impl Session {
    /// Creates a fresh session from a validated puzzle.
    #[must_use]
    pub fn new(puzzle: Puzzle, meta: SessionMeta) -> Self {
        let (givens, solution) = puzzle.into_parts();
        let mut cells = [CellState::Empty; 81];
        for pos in Position::ALL {
            if let Some(digit) = givens.get(pos) {
                cells[pos.cell_index()] = CellState::Given(digit);
            }
        }
        Self {
            cells,
            solution,
            selection: None,
            mode: EntryMode::default(),
            meta,
        }
    }

    /// Restores a session from saved player input.
    ///
    /// `filled` holds player-entered values (givens excluded) and
    /// `notes` the per-cell annotation sets in row-major order.
    ///
    /// # Errors
    ///
    /// Returns a [`RestoreError`] when the saved input collides with
    /// the puzzle's givens or puts annotations beside a value.
    pub fn from_saved(
        puzzle: Puzzle,
        filled: &DigitGrid,
        notes: &[DigitSet; 81],
        selection: Option<Position>,
        mode: EntryMode,
        meta: SessionMeta,
    ) -> Result<Self, RestoreError> {
        let mut session = Self::new(puzzle, meta);
        for pos in Position::ALL {
            if let Some(digit) = filled.get(pos) {
                if session.cells[pos.cell_index()].is_given() {
                    return Err(RestoreError::GivenOverwrite);
                }
                session.cells[pos.cell_index()] = CellState::Filled(digit);
            }
        }
        for pos in Position::ALL {
            let set = notes[pos.cell_index()];
            if set.is_empty() {
                continue;
            }
            if !session.cells[pos.cell_index()].is_empty() {
                return Err(RestoreError::NoteBesideValue);
            }
            session.cells[pos.cell_index()] = CellState::Notes(set);
        }
        session.selection = selection;
        session.mode = mode;
        Ok(session)
    }

    /// Returns the state of the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[pos.cell_index()]
    }

    /// Returns the stored solution grid.
    #[must_use]
    pub fn solution(&self) -> &DigitGrid {
        &self.solution
    }

    /// Returns the current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// Returns the current entry mode.
    #[must_use]
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Returns the session metadata.
    #[must_use]
    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    /// Moves the selection cursor to `pos`. Idempotent, never fails.
    pub fn select(&mut self, pos: Position) {
        self.selection = Some(pos);
    }

    /// Sets the entry mode. Does not touch the board.
    pub fn set_mode(&mut self, mode: EntryMode) {
        self.mode = mode;
    }

    /// Flips between value and annotation entry.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Applies digit input to the selected cell according to the entry
    /// mode.
    ///
    /// In [`EntryMode::Value`] the digit becomes the cell's value,
    /// replacing any annotations. In [`EntryMode::Annotate`] the digit
    /// toggles membership in the cell's annotation set; cells holding a
    /// value are left alone. Without a selection, or on a given cell,
    /// this is a no-op.
    pub fn input(&mut self, digit: Digit) -> InputOperation {
        let Some(pos) = self.selection else {
            return InputOperation::NoOp;
        };
        let i = pos.cell_index();
        match self.mode {
            EntryMode::Value => match self.cells[i] {
                CellState::Given(_) => InputOperation::NoOp,
                CellState::Filled(current) if current == digit => InputOperation::NoOp,
                CellState::Empty | CellState::Filled(_) | CellState::Notes(_) => {
                    self.cells[i] = CellState::Filled(digit);
                    InputOperation::Set
                }
            },
            EntryMode::Annotate => match self.cells[i] {
                CellState::Given(_) | CellState::Filled(_) => InputOperation::NoOp,
                CellState::Empty => {
                    self.cells[i] = CellState::Notes(DigitSet::from_elem(digit));
                    InputOperation::Set
                }
                CellState::Notes(mut notes) => {
                    if notes.toggle(digit) {
                        self.cells[i] = CellState::Notes(notes);
                        InputOperation::Set
                    } else {
                        self.cells[i] = if notes.is_empty() {
                            CellState::Empty
                        } else {
                            CellState::Notes(notes)
                        };
                        InputOperation::Removed
                    }
                }
            },
        }
    }

    /// Clears the selected cell according to the entry mode.
    ///
    /// Value mode removes the player-entered value; annotation mode
    /// removes the annotation set. Without a selection, or on a given
    /// cell, this is a no-op.
    pub fn clear_selected(&mut self) -> InputOperation {
        let Some(pos) = self.selection else {
            return InputOperation::NoOp;
        };
        let i = pos.cell_index();
        match (self.mode, self.cells[i]) {
            (EntryMode::Value, CellState::Filled(_)) | (EntryMode::Annotate, CellState::Notes(_)) => {
                self.cells[i] = CellState::Empty;
                InputOperation::Removed
            }
            _ => InputOperation::NoOp,
        }
    }

    /// Returns whether the board matches the solution cell by cell.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Position::ALL
            .iter()
            .all(|&pos| self.cells[pos.cell_index()].as_digit() == self.solution.get(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION: &str =
        "123456789456789123789123456231564897564897231897231564312645978645978312978312645";

    fn solution_grid() -> DigitGrid {
        SOLUTION.parse().unwrap()
    }

    fn session_with_first_row_given() -> Session {
        let givens: DigitGrid = format!("123456789{}", "0".repeat(72)).parse().unwrap();
        let puzzle = Puzzle::new(givens, solution_grid()).unwrap();
        Session::new(puzzle, SessionMeta::default())
    }

    #[test]
    fn test_new_session_marks_givens() {
        let session = session_with_first_row_given();
        assert_eq!(
            session.cell(Position::new(0, 0)),
            CellState::Given(Digit::D1)
        );
        assert_eq!(session.cell(Position::new(0, 1)), CellState::Empty);
        assert_eq!(session.selection(), None);
        assert_eq!(session.mode(), EntryMode::Value);
    }

    #[test]
    fn test_input_without_selection_is_noop() {
        let mut session = session_with_first_row_given();
        assert_eq!(session.input(Digit::D5), InputOperation::NoOp);
        assert_eq!(session.clear_selected(), InputOperation::NoOp);
    }

    #[test]
    fn test_given_cells_are_immutable() {
        let mut session = session_with_first_row_given();
        let given = Position::new(3, 0);
        session.select(given);

        assert_eq!(session.input(Digit::D9), InputOperation::NoOp);
        assert_eq!(session.cell(given), CellState::Given(Digit::D4));

        session.set_mode(EntryMode::Annotate);
        assert_eq!(session.input(Digit::D9), InputOperation::NoOp);
        assert_eq!(session.clear_selected(), InputOperation::NoOp);
        assert_eq!(session.cell(given), CellState::Given(Digit::D4));
    }

    #[test]
    fn test_value_entry_replaces_annotations() {
        let mut session = session_with_first_row_given();
        let pos = Position::new(0, 1);
        session.select(pos);

        session.set_mode(EntryMode::Annotate);
        assert_eq!(session.input(Digit::D2), InputOperation::Set);
        assert_eq!(session.input(Digit::D7), InputOperation::Set);

        session.set_mode(EntryMode::Value);
        assert_eq!(session.input(Digit::D4), InputOperation::Set);
        // Value and annotations are mutually exclusive per cell.
        assert_eq!(session.cell(pos), CellState::Filled(Digit::D4));
        assert_eq!(session.cell(pos).notes(), DigitSet::EMPTY);
    }

    #[test]
    fn test_reentering_same_value_is_noop() {
        let mut session = session_with_first_row_given();
        session.select(Position::new(0, 1));
        assert_eq!(session.input(Digit::D4), InputOperation::Set);
        assert_eq!(session.input(Digit::D4), InputOperation::NoOp);
        assert_eq!(session.input(Digit::D6), InputOperation::Set);
    }

    #[test]
    fn test_annotation_toggles() {
        let mut session = session_with_first_row_given();
        let pos = Position::new(4, 4);
        session.select(pos);
        session.set_mode(EntryMode::Annotate);

        assert_eq!(session.input(Digit::D3), InputOperation::Set);
        assert_eq!(session.input(Digit::D8), InputOperation::Set);
        assert!(session.cell(pos).notes().contains(Digit::D3));

        assert_eq!(session.input(Digit::D3), InputOperation::Removed);
        assert!(!session.cell(pos).notes().contains(Digit::D3));

        // Removing the last annotation empties the cell.
        assert_eq!(session.input(Digit::D8), InputOperation::Removed);
        assert_eq!(session.cell(pos), CellState::Empty);
    }

    #[test]
    fn test_annotation_on_filled_cell_is_noop() {
        let mut session = session_with_first_row_given();
        let pos = Position::new(0, 1);
        session.select(pos);
        session.input(Digit::D4);

        session.set_mode(EntryMode::Annotate);
        assert_eq!(session.input(Digit::D2), InputOperation::NoOp);
        assert_eq!(session.cell(pos), CellState::Filled(Digit::D4));
    }

    #[test]
    fn test_clear_respects_mode() {
        let mut session = session_with_first_row_given();
        let pos = Position::new(0, 1);
        session.select(pos);
        session.input(Digit::D4);

        // Annotation-mode clear leaves the value alone.
        session.set_mode(EntryMode::Annotate);
        assert_eq!(session.clear_selected(), InputOperation::NoOp);
        assert_eq!(session.cell(pos), CellState::Filled(Digit::D4));

        session.set_mode(EntryMode::Value);
        assert_eq!(session.clear_selected(), InputOperation::Removed);
        assert_eq!(session.cell(pos), CellState::Empty);

        // Value-mode clear leaves annotations alone.
        session.set_mode(EntryMode::Annotate);
        session.input(Digit::D5);
        session.set_mode(EntryMode::Value);
        assert_eq!(session.clear_selected(), InputOperation::NoOp);
        assert!(session.cell(pos).notes().contains(Digit::D5));
    }

    #[test]
    fn test_toggle_mode() {
        let mut session = session_with_first_row_given();
        assert_eq!(session.mode(), EntryMode::Value);
        session.toggle_mode();
        assert_eq!(session.mode(), EntryMode::Annotate);
        session.toggle_mode();
        assert_eq!(session.mode(), EntryMode::Value);
    }

    #[test]
    fn test_is_solved_flips_on_single_cell() {
        let solution = solution_grid();
        let puzzle = Puzzle::new(solution.clone(), solution.clone()).unwrap();
        let session = Session::new(puzzle, SessionMeta::default());
        // Every cell given and matching: solved from the start.
        assert!(session.is_solved());

        // Leave one cell open and fill it wrong, then right.
        let mut givens = solution.clone();
        let open = Position::new(8, 8);
        givens.set(open, None);
        let puzzle = Puzzle::new(givens, solution.clone()).unwrap();
        let mut session = Session::new(puzzle, SessionMeta::default());
        assert!(!session.is_solved());

        session.select(open);
        session.input(Digit::D1); // solution has 5 here
        assert!(!session.is_solved());
        session.input(Digit::D5);
        assert!(session.is_solved());
    }

    #[test]
    fn test_from_saved_rejects_collisions() {
        let givens: DigitGrid = format!("123456789{}", "0".repeat(72)).parse().unwrap();
        let notes = [DigitSet::EMPTY; 81];

        let mut filled = DigitGrid::new();
        filled.set(Position::new(0, 0), Some(Digit::D1));
        let puzzle = Puzzle::new(givens.clone(), solution_grid()).unwrap();
        assert_eq!(
            Session::from_saved(
                puzzle,
                &filled,
                &notes,
                None,
                EntryMode::Value,
                SessionMeta::default(),
            ),
            Err(RestoreError::GivenOverwrite)
        );

        let mut filled = DigitGrid::new();
        filled.set(Position::new(0, 1), Some(Digit::D4));
        let mut notes = [DigitSet::EMPTY; 81];
        notes[Position::new(0, 1).cell_index()] = DigitSet::from_elem(Digit::D2);
        let puzzle = Puzzle::new(givens, solution_grid()).unwrap();
        assert_eq!(
            Session::from_saved(
                puzzle,
                &filled,
                &notes,
                None,
                EntryMode::Value,
                SessionMeta::default(),
            ),
            Err(RestoreError::NoteBesideValue)
        );
    }

    #[test]
    fn test_from_saved_restores_state() {
        let givens: DigitGrid = format!("123456789{}", "0".repeat(72)).parse().unwrap();
        let mut filled = DigitGrid::new();
        filled.set(Position::new(0, 1), Some(Digit::D4));
        let mut notes = [DigitSet::EMPTY; 81];
        notes[Position::new(5, 5).cell_index()] = DigitSet::from_elem(Digit::D9);

        let puzzle = Puzzle::new(givens, solution_grid()).unwrap();
        let session = Session::from_saved(
            puzzle,
            &filled,
            &notes,
            Some(Position::new(5, 5)),
            EntryMode::Annotate,
            SessionMeta {
                difficulty: "hard".to_owned(),
                index: 7,
                timed: true,
            },
        )
        .unwrap();

        assert_eq!(
            session.cell(Position::new(0, 1)),
            CellState::Filled(Digit::D4)
        );
        assert!(session.cell(Position::new(5, 5)).notes().contains(Digit::D9));
        assert_eq!(session.selection(), Some(Position::new(5, 5)));
        assert_eq!(session.mode(), EntryMode::Annotate);
        assert_eq!(session.meta().difficulty, "hard");
        assert!(session.meta().timed);
    }
}
