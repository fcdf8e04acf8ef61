//! Persistence-facing surface of the Numera engine.
//!
//! This crate defines *what* is persisted and how it round-trips; the
//! mechanism that durably stores bytes is an external collaborator
//! behind the [`SnapshotSlot`] and [`LeaderboardSlot`] traits.
//!
//! - [`Snapshot`] with [`encode`]/[`decode`] captures a full play
//!   session for suspend/resume.
//! - [`Leaderboard`] keeps the append-only, timestamp-ordered record
//!   list for timed challenge solves.
//!
//! Corrupt or foreign persisted data never crashes a read path: decode
//! failures degrade to "no saved session" and unparseable leaderboard
//! timestamps sort to the end, with a `log` warning either way.

pub use self::{
    leaderboard::{
        Leaderboard, LeaderboardEntry, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp,
    },
    slot::{LeaderboardSlot, MemorySlot, SnapshotSlot, StoreError},
    snapshot::{DecodeError, Snapshot, SnapshotMode, decode, encode, resume_session, save_session},
};

mod leaderboard;
mod slot;
mod snapshot;
