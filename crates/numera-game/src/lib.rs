//! The Numera puzzle engine: puzzle validation, the play-session state
//! machine, the hint subsystem, and the puzzle catalog.
//!
//! The engine is single-threaded and synchronous: every operation is an
//! in-memory transformation. The only I/O seam is the
//! [`CatalogLoader`] trait, which supplies the raw puzzle document; the
//! surrounding application decides how (and whether asynchronously) to
//! fetch it.
//!
//! # Loading a session
//!
//! Puzzles arrive from a catalog document as `(givens, solution)`
//! string pairs, pass through validation exactly once, and become a
//! [`Session`]:
//!
//! ```
//! use numera_game::{PuzzleCatalog, load_session};
//!
//! let doc = serde_json::json!({
//!     "easy": [{
//!         "givens":   "123456789000000000000000000000000000000000000000000000000000000000000000000000000",
//!         "solution": "123456789456789123789123456231564897564897231897231564312645978645978312978312645",
//!     }],
//! });
//! let catalog = PuzzleCatalog::from_json(doc)?;
//! let session = load_session(&catalog, "easy", 1, false)?;
//! assert!(!session.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    cell::CellState,
    hint::{HintEngine, HintError, HintPolicy, reveal_plain, reveal_safe},
    puzzle::{Puzzle, ValidationError},
    session::{EntryMode, InputOperation, RestoreError, Session, SessionMeta},
    source::{
        CatalogCache, CatalogError, CatalogLoader, LoadError, PuzzleCatalog, SourceError,
        load_session,
    },
};

mod cell;
mod hint;
mod puzzle;
mod session;
mod source;
