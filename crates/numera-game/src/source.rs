//! The puzzle catalog: typed access to pre-made puzzles.
//!
//! Puzzles arrive as an untyped document (tier name → list of
//! `{givens, solution}` 81-character strings) and are converted into
//! typed grids here, at the boundary. The document itself is fetched by
//! a [`CatalogLoader`] supplied by the application; [`CatalogCache`]
//! memoizes the parsed catalog across loads and exposes an explicit
//! invalidate/reload lifecycle.

use std::collections::BTreeMap;

use derive_more::{Display, Error, From};
use numera_core::DigitGrid;
use serde::Deserialize;

use crate::{Puzzle, Session, SessionMeta, ValidationError};

/// A lookup failure in the puzzle catalog.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SourceError {
    /// The requested tier or index does not exist.
    #[display("no puzzle for tier {tier:?} at index {index}")]
    NotFound {
        /// Requested difficulty tier.
        tier: String,
        /// Requested 1-based index.
        index: u32,
    },
}

/// A failure loading or parsing the catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CatalogError {
    /// The loader could not produce a document.
    #[display("puzzle document could not be loaded: {message}")]
    Unavailable {
        /// Loader-supplied description.
        message: String,
    },
    /// The document does not have the expected shape or grid contents.
    #[display("puzzle document is malformed: {message}")]
    Malformed {
        /// Description of the structural problem.
        message: String,
    },
}

/// A failure loading a puzzle into a session.
///
/// Load failures abort the load only; any prior session is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum LoadError {
    /// The catalog has no such puzzle.
    #[display("{_0}")]
    Source(SourceError),
    /// The puzzle data failed validation.
    #[display("{_0}")]
    Validation(ValidationError),
}

#[derive(Debug, Deserialize)]
struct RecordDoc {
    givens: String,
    solution: String,
}

/// A parsed, typed puzzle catalog.
///
/// Grids are parsed from their string form when the catalog is built;
/// puzzle validation itself happens later, exactly once per fetch,
/// before a session is constructed (see [`load_session`]).
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    tiers: BTreeMap<String, Vec<(DigitGrid, DigitGrid)>>,
}

impl PuzzleCatalog {
    /// Parses a catalog from an untyped JSON document mapping tier
    /// names to lists of `{givens, solution}` records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the document shape or
    /// any grid string is invalid.
    pub fn from_json(doc: serde_json::Value) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Vec<RecordDoc>> =
            serde_json::from_value(doc).map_err(|err| CatalogError::Malformed {
                message: err.to_string(),
            })?;
        let mut tiers = BTreeMap::new();
        for (tier, records) in raw {
            let mut puzzles = Vec::with_capacity(records.len());
            for (i, record) in records.iter().enumerate() {
                let givens = parse_grid(&tier, i, "givens", &record.givens)?;
                let solution = parse_grid(&tier, i, "solution", &record.solution)?;
                puzzles.push((givens, solution));
            }
            tiers.insert(tier, puzzles);
        }
        Ok(Self { tiers })
    }

    /// Returns the number of puzzles in `tier` (0 for unknown tiers).
    #[must_use]
    pub fn tier_len(&self, tier: &str) -> usize {
        self.tiers.get(tier).map_or(0, Vec::len)
    }

    /// Returns the `(givens, solution)` pair at the 1-based `index` of
    /// `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when the tier or index is
    /// unknown.
    pub fn fetch(&self, tier: &str, index: u32) -> Result<(DigitGrid, DigitGrid), SourceError> {
        let not_found = || SourceError::NotFound {
            tier: tier.to_owned(),
            index,
        };
        let puzzles = self.tiers.get(tier).ok_or_else(not_found)?;
        let slot = usize::try_from(index.checked_sub(1).ok_or_else(not_found)?)
            .map_err(|_| not_found())?;
        let (givens, solution) = puzzles.get(slot).ok_or_else(not_found)?;
        Ok((givens.clone(), solution.clone()))
    }
}

fn parse_grid(
    tier: &str,
    index: usize,
    field: &str,
    text: &str,
) -> Result<DigitGrid, CatalogError> {
    text.parse().map_err(|err| CatalogError::Malformed {
        message: format!("tier {tier:?}, puzzle {}: {field}: {err}", index + 1),
    })
}

/// Supplies the raw catalog document.
///
/// This is the engine's only I/O seam for puzzle data: implementations
/// may read a bundled asset, a file, or a network resource, and the
/// surrounding application decides how to schedule that work. The
/// loader must return either a complete document or an error, never a
/// partial one.
pub trait CatalogLoader {
    /// Produces the catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] (or `Malformed`) when no
    /// document can be produced.
    fn load(&mut self) -> Result<serde_json::Value, CatalogError>;
}

/// A load-once-then-memoize handle around a [`CatalogLoader`].
///
/// The parsed catalog is cached after the first successful load and
/// reused until [`CatalogCache::invalidate`] or
/// [`CatalogCache::reload`] is called. Pass this handle explicitly to
/// whoever needs puzzles; there is no ambient global catalog.
#[derive(Debug)]
pub struct CatalogCache<L> {
    loader: L,
    catalog: Option<PuzzleCatalog>,
}

impl<L: CatalogLoader> CatalogCache<L> {
    /// Creates an empty cache around `loader`. Nothing is loaded until
    /// the first call to [`CatalogCache::catalog`].
    #[must_use]
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            catalog: None,
        }
    }

    /// Returns the parsed catalog, loading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates loader and parse failures; a failed load leaves the
    /// cache empty so a later call retries.
    pub fn catalog(&mut self) -> Result<&PuzzleCatalog, CatalogError> {
        if self.catalog.is_none() {
            let doc = self.loader.load()?;
            self.catalog = Some(PuzzleCatalog::from_json(doc)?);
        }
        match &self.catalog {
            Some(catalog) => Ok(catalog),
            None => unreachable!("catalog was just populated"),
        }
    }

    /// Drops the cached catalog; the next access loads afresh.
    pub fn invalidate(&mut self) {
        self.catalog = None;
    }

    /// Discards the cached catalog and loads it again immediately.
    ///
    /// # Errors
    ///
    /// Propagates loader and parse failures.
    pub fn reload(&mut self) -> Result<&PuzzleCatalog, CatalogError> {
        self.invalidate();
        self.catalog()
    }
}

/// Fetches, validates, and opens a puzzle as a new [`Session`].
///
/// This is the composed load path: catalog lookup, then validation
/// (run exactly once), then session construction. On any failure the
/// caller's existing session, if any, stays in place.
///
/// # Errors
///
/// Returns [`LoadError::Source`] when the tier or index is unknown and
/// [`LoadError::Validation`] when the puzzle data is inconsistent.
pub fn load_session(
    catalog: &PuzzleCatalog,
    tier: &str,
    index: u32,
    timed: bool,
) -> Result<Session, LoadError> {
    let (givens, solution) = catalog.fetch(tier, index)?;
    let puzzle = Puzzle::new(givens, solution)?;
    Ok(Session::new(
        puzzle,
        SessionMeta {
            difficulty: tier.to_owned(),
            index,
            timed,
        },
    ))
}

#[cfg(test)]
mod tests {
    use numera_core::{Digit, Position};
    use serde_json::json;

    use crate::CellState;

    use super::*;

    const SOLUTION: &str =
        "123456789456789123789123456231564897564897231897231564312645978645978312978312645";

    fn sample_doc() -> serde_json::Value {
        let givens = format!("123456789{}", "0".repeat(72));
        json!({
            "easy": [
                { "givens": givens, "solution": SOLUTION },
            ],
        })
    }

    #[test]
    fn test_catalog_parses_and_fetches() {
        let catalog = PuzzleCatalog::from_json(sample_doc()).unwrap();
        assert_eq!(catalog.tier_len("easy"), 1);
        assert_eq!(catalog.tier_len("hard"), 0);

        let (givens, solution) = catalog.fetch("easy", 1).unwrap();
        assert_eq!(givens.get(Position::new(0, 0)), Some(Digit::D1));
        assert!(solution.is_complete());
    }

    #[test]
    fn test_fetch_unknown_tier_or_index() {
        let catalog = PuzzleCatalog::from_json(sample_doc()).unwrap();
        assert_eq!(
            catalog.fetch("hard", 1),
            Err(SourceError::NotFound {
                tier: "hard".to_owned(),
                index: 1,
            })
        );
        assert_eq!(
            catalog.fetch("easy", 2),
            Err(SourceError::NotFound {
                tier: "easy".to_owned(),
                index: 2,
            })
        );
        // Indices are 1-based; 0 is never valid.
        assert!(catalog.fetch("easy", 0).is_err());
    }

    #[test]
    fn test_malformed_documents_rejected() {
        assert!(matches!(
            PuzzleCatalog::from_json(json!({ "easy": [{ "givens": "123" }] })),
            Err(CatalogError::Malformed { .. })
        ));
        assert!(matches!(
            PuzzleCatalog::from_json(json!({
                "easy": [{ "givens": "123", "solution": SOLUTION }],
            })),
            Err(CatalogError::Malformed { .. })
        ));
        assert!(matches!(
            PuzzleCatalog::from_json(json!([1, 2, 3])),
            Err(CatalogError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_session_builds_session_with_meta() {
        let catalog = PuzzleCatalog::from_json(sample_doc()).unwrap();
        let session = load_session(&catalog, "easy", 1, true).unwrap();
        assert_eq!(
            session.cell(Position::new(0, 0)),
            CellState::Given(Digit::D1)
        );
        assert_eq!(session.meta().difficulty, "easy");
        assert_eq!(session.meta().index, 1);
        assert!(session.meta().timed);
    }

    #[test]
    fn test_load_session_rejects_inconsistent_puzzle() {
        let bad_solution = format!("213456789{}", &SOLUTION[9..]);
        let doc = json!({
            "easy": [{
                "givens": format!("123456789{}", "0".repeat(72)),
                "solution": bad_solution,
            }],
        });
        let catalog = PuzzleCatalog::from_json(doc).unwrap();
        assert!(matches!(
            load_session(&catalog, "easy", 1, false),
            Err(LoadError::Validation(_))
        ));
    }

    struct CountingLoader {
        loads: usize,
    }

    impl CatalogLoader for CountingLoader {
        fn load(&mut self) -> Result<serde_json::Value, CatalogError> {
            self.loads += 1;
            Ok(sample_doc())
        }
    }

    #[test]
    fn test_cache_memoizes_until_invalidated() {
        let mut cache = CatalogCache::new(CountingLoader { loads: 0 });

        assert_eq!(cache.catalog().unwrap().tier_len("easy"), 1);
        assert_eq!(cache.catalog().unwrap().tier_len("easy"), 1);
        assert_eq!(cache.loader.loads, 1);

        cache.invalidate();
        assert_eq!(cache.catalog().unwrap().tier_len("easy"), 1);
        assert_eq!(cache.loader.loads, 2);

        cache.reload().unwrap();
        assert_eq!(cache.loader.loads, 3);
    }

    struct FailingLoader;

    impl CatalogLoader for FailingLoader {
        fn load(&mut self) -> Result<serde_json::Value, CatalogError> {
            Err(CatalogError::Unavailable {
                message: "asset missing".to_owned(),
            })
        }
    }

    #[test]
    fn test_cache_failure_leaves_cache_empty() {
        let mut cache = CatalogCache::new(FailingLoader);
        assert!(matches!(
            cache.catalog(),
            Err(CatalogError::Unavailable { .. })
        ));
        // A later call retries rather than caching the failure.
        assert!(cache.catalog().is_err());
    }
}
