//! Persistence slot traits and the in-memory reference implementation.

use derive_more::{Display, Error};

use crate::{LeaderboardEntry, Snapshot};

/// A storage-side failure.
///
/// The engine does not interpret these beyond reporting them; the
/// message comes from the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("storage failure: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Creates a storage error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single named slot holding at most one session snapshot.
///
/// `save` overwrites the slot. Writes must be all-or-nothing: a
/// partially written snapshot must never be observable to `load`.
pub trait SnapshotSlot {
    /// Overwrites the slot with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write fails; the previous
    /// contents must then still be intact.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Loads the stored snapshot, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the read fails.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
}

/// A single named slot holding the leaderboard record sequence,
/// loaded and saved wholesale.
pub trait LeaderboardSlot {
    /// Overwrites the stored sequence with `entries`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write fails.
    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;

    /// Loads all stored entries in persisted order (empty if absent).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the read fails.
    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

/// In-memory slots, used in tests and as the reference semantics for
/// real storage collaborators.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    snapshot: Option<Snapshot>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl MemorySlot {
    /// Creates empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSlot for MemorySlot {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }
}

impl LeaderboardSlot for MemorySlot {
    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        self.leaderboard = entries.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.leaderboard.clone())
    }
}
