//! The session snapshot codec.

use derive_more::{Display, Error};
use numera_core::{Digit, DigitGrid, DigitSet, Position};
use numera_game::{EntryMode, Puzzle, Session, SessionMeta};
use serde::{Deserialize, Serialize};

use crate::{SnapshotSlot, StoreError};

/// The entry mode as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMode {
    /// Value entry.
    Value,
    /// Annotation entry.
    Annotate,
}

impl From<EntryMode> for SnapshotMode {
    fn from(mode: EntryMode) -> Self {
        match mode {
            EntryMode::Value => Self::Value,
            EntryMode::Annotate => Self::Annotate,
        }
    }
}

impl From<SnapshotMode> for EntryMode {
    fn from(mode: SnapshotMode) -> Self {
        match mode {
            SnapshotMode::Value => Self::Value,
            SnapshotMode::Annotate => Self::Annotate,
        }
    }
}

/// A serializable capture of a full play session.
///
/// All board sequences are row-major with 81 elements; digit values use
/// 0 for empty. `entered` contains both givens and player values, with
/// `fixed` marking which are givens. `notes` holds each cell's
/// annotations as an ascending, duplicate-free digit list. The record
/// derives `serde` traits so the storage collaborator can pick any
/// transport.
///
/// Encoding a well-formed session is total; decoding validates shape
/// and content and fails with [`DecodeError::Malformed`] on anything
/// unexpected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Difficulty tier label.
    pub difficulty: String,
    /// 1-based puzzle index within the tier.
    pub index: u32,
    /// Whether the session is a timed challenge.
    pub timed: bool,
    /// Current cell values, 0 for empty.
    pub entered: Vec<u8>,
    /// Which cells are givens.
    pub fixed: Vec<bool>,
    /// The solution grid, digits 1-9.
    pub solution: Vec<u8>,
    /// Per-cell annotation digits, ascending and duplicate-free.
    pub notes: Vec<Vec<u8>>,
    /// Selected cell as `(x, y)`, if any.
    pub selection: Option<(u8, u8)>,
    /// Entry mode.
    pub mode: SnapshotMode,
}

/// A snapshot that cannot be turned back into a session.
///
/// Callers treat this as "no usable saved session", never as a fatal
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// The snapshot's shape or contents are invalid.
    #[display("snapshot is malformed: {reason}")]
    Malformed {
        /// What was wrong, for diagnostics.
        reason: &'static str,
    },
}

const fn malformed(reason: &'static str) -> DecodeError {
    DecodeError::Malformed { reason }
}

/// Captures `session` as a [`Snapshot`]. Never fails.
#[must_use]
pub fn encode(session: &Session) -> Snapshot {
    let mut entered = Vec::with_capacity(81);
    let mut fixed = Vec::with_capacity(81);
    let mut solution = Vec::with_capacity(81);
    let mut notes = Vec::with_capacity(81);
    for pos in Position::ALL {
        let cell = session.cell(pos);
        entered.push(cell.as_digit().map_or(0, Digit::value));
        fixed.push(cell.is_given());
        solution.push(session.solution().get(pos).map_or(0, Digit::value));
        notes.push(cell.notes().into_iter().map(Digit::value).collect());
    }
    Snapshot {
        difficulty: session.meta().difficulty.clone(),
        index: session.meta().index,
        timed: session.meta().timed,
        entered,
        fixed,
        solution,
        notes,
        selection: session.selection().map(|pos| (pos.x(), pos.y())),
        mode: session.mode().into(),
    }
}

/// Rebuilds a [`Session`] from a [`Snapshot`].
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when any sequence is not 81 cells
/// long, a digit is out of range, a given cell is empty, annotations
/// sit beside a value, the selection is off the board, or the embedded
/// puzzle data fails validation.
pub fn decode(snapshot: &Snapshot) -> Result<Session, DecodeError> {
    if snapshot.entered.len() != 81
        || snapshot.fixed.len() != 81
        || snapshot.solution.len() != 81
        || snapshot.notes.len() != 81
    {
        return Err(malformed("board sequences must have 81 cells"));
    }

    let mut givens = DigitGrid::new();
    let mut filled = DigitGrid::new();
    let mut solution = DigitGrid::new();
    let mut notes = [DigitSet::EMPTY; 81];

    for pos in Position::ALL {
        let i = pos.cell_index();

        let digit = Digit::try_from_value(snapshot.solution[i])
            .ok_or(malformed("solution digit out of range"))?;
        solution.set(pos, Some(digit));

        match snapshot.entered[i] {
            0 => {
                if snapshot.fixed[i] {
                    return Err(malformed("given cell without a digit"));
                }
            }
            value => {
                let digit =
                    Digit::try_from_value(value).ok_or(malformed("entered digit out of range"))?;
                if snapshot.fixed[i] {
                    givens.set(pos, Some(digit));
                } else {
                    filled.set(pos, Some(digit));
                }
            }
        }

        for &value in &snapshot.notes[i] {
            let digit =
                Digit::try_from_value(value).ok_or(malformed("annotation digit out of range"))?;
            notes[i].insert(digit);
        }
    }

    let selection = match snapshot.selection {
        None => None,
        Some((x, y)) => {
            if x >= 9 || y >= 9 {
                return Err(malformed("selection off the board"));
            }
            Some(Position::new(x, y))
        }
    };

    let puzzle = Puzzle::new(givens, solution)
        .map_err(|_| malformed("puzzle data fails validation"))?;
    let meta = SessionMeta {
        difficulty: snapshot.difficulty.clone(),
        index: snapshot.index,
        timed: snapshot.timed,
    };
    Session::from_saved(puzzle, &filled, &notes, selection, snapshot.mode.into(), meta)
        .map_err(|_| malformed("saved input contradicts the puzzle"))
}

/// Encodes `session` and overwrites the snapshot slot with it.
///
/// # Errors
///
/// Propagates storage failures.
pub fn save_session<S: SnapshotSlot>(slot: &mut S, session: &Session) -> Result<(), StoreError> {
    slot.save(&encode(session))
}

/// Loads and decodes the saved session, if any.
///
/// A snapshot that fails to decode is logged and treated as no saved
/// session; only storage failures propagate.
///
/// # Errors
///
/// Propagates storage failures.
pub fn resume_session<S: SnapshotSlot>(slot: &S) -> Result<Option<Session>, StoreError> {
    let Some(snapshot) = slot.load()? else {
        return Ok(None);
    };
    match decode(&snapshot) {
        Ok(session) => Ok(Some(session)),
        Err(err) => {
            log::warn!("discarding saved session: {err}");
            Ok(None)
        }
    }
}
