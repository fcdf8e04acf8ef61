//! The challenge-mode leaderboard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{LeaderboardSlot, StoreError};

/// The persisted timestamp form: `YYYY-MM-DD-HH:MM`, zero-padded,
/// 24-hour clock. This exact lexical form is both the stored
/// representation and the sort key.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M";

/// One leaderboard record.
///
/// Entries are append-only: the engine never mutates, deduplicates,
/// caps, or removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player-supplied name.
    pub name: String,
    /// Timestamp in [`TIMESTAMP_FORMAT`]. Treated as untrusted on
    /// read; see [`Leaderboard::list`].
    pub time: String,
}

/// Formats a timestamp into the persisted form.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use numera_store::format_timestamp;
///
/// let when = NaiveDate::from_ymd_opt(2024, 3, 7)
///     .unwrap()
///     .and_hms_opt(9, 5, 0)
///     .unwrap();
/// assert_eq!(format_timestamp(when), "2024-03-07-09:05");
/// ```
#[must_use]
pub fn format_timestamp(when: NaiveDateTime) -> String {
    when.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a persisted timestamp, or `None` if it does not match the
/// fixed form.
#[must_use]
pub fn parse_timestamp(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT).ok()
}

/// The timed-challenge leaderboard over a persistence slot.
///
/// Writes prepend without ordering guarantees; every read re-sorts, so
/// the stored sequence may be arbitrary (including data written by
/// older or foreign code) without breaking the read path.
#[derive(Debug)]
pub struct Leaderboard<S> {
    slot: S,
}

impl<S: LeaderboardSlot> Leaderboard<S> {
    /// Creates a leaderboard over `slot`.
    #[must_use]
    pub const fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Returns the underlying slot.
    #[must_use]
    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Records a solve: formats `when` and prepends a new entry to the
    /// persisted sequence.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn append(&mut self, name: &str, when: NaiveDateTime) -> Result<(), StoreError> {
        let mut entries = self.slot.load()?;
        entries.insert(
            0,
            LeaderboardEntry {
                name: name.to_owned(),
                time: format_timestamp(when),
            },
        );
        self.slot.save(&entries)
    }

    /// Returns all entries, most recent first.
    ///
    /// Entries whose timestamp does not parse are logged and sorted to
    /// the end as "oldest possible"; ties keep their persisted order
    /// (the sort is stable). Corrupt data never fails this read path.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn list(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut keyed: Vec<(Option<NaiveDateTime>, LeaderboardEntry)> = self
            .slot
            .load()?
            .into_iter()
            .map(|entry| {
                let key = parse_timestamp(&entry.time);
                if key.is_none() {
                    log::warn!(
                        "leaderboard entry for {:?} has unparseable timestamp {:?}",
                        entry.name,
                        entry.time,
                    );
                }
                (key, entry)
            })
            .collect();
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
    }
}
