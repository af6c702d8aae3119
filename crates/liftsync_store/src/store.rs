//! The three synced collections behind one upsert/query contract.

use crate::counter::VersionCounter;
use crate::table::Table;
use liftsync_protocol::{ChangeSet, ExerciseRecord, SessionRecord, SetRecord, Version};
use std::sync::Arc;

/// Keyed storage for the three synced collections.
///
/// The store exclusively owns all synced rows; the sync layer only
/// reads and writes through this contract. All three tables share one
/// version counter, so versions are unique across collections and the
/// counter's current value is the server version.
pub struct RecordStore {
    counter: Arc<VersionCounter>,
    sessions: Table<SessionRecord>,
    exercises: Table<ExerciseRecord>,
    sets: Table<SetRecord>,
}

impl RecordStore {
    /// Creates an empty store with a fresh counter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(Version::ZERO)
    }

    /// Creates an empty store whose counter continues from the given
    /// version, for reconstructing state from existing rows.
    #[must_use]
    pub fn with_version(version: Version) -> Self {
        let counter = Arc::new(VersionCounter::with_current(version));
        Self {
            sessions: Table::new(Arc::clone(&counter)),
            exercises: Table::new(Arc::clone(&counter)),
            sets: Table::new(Arc::clone(&counter)),
            counter,
        }
    }

    /// Returns the highest version ever assigned, or zero when empty.
    #[must_use]
    pub fn current_version(&self) -> Version {
        self.counter.current()
    }

    /// The sessions collection.
    pub fn sessions(&self) -> &Table<SessionRecord> {
        &self.sessions
    }

    /// The exercises collection.
    pub fn exercises(&self) -> &Table<ExerciseRecord> {
        &self.exercises
    }

    /// The sets collection.
    pub fn sets(&self) -> &Table<SetRecord> {
        &self.sets
    }

    /// Applies an inbound change batch, upserting rows in the order
    /// supplied. Each row is committed with its own freshly drawn
    /// version. Returns the version stamped on the last row written,
    /// which is the highest this call assigned, or zero for an empty
    /// batch. Callers must not report the live counter as this batch's
    /// high-water mark: concurrent writers may have drawn past it.
    pub fn apply(&self, changes: &ChangeSet) -> Version {
        let mut last = Version::ZERO;
        for row in &changes.sessions {
            last = self.sessions.upsert(row.clone());
        }
        for row in &changes.exercises {
            last = self.exercises.upsert(row.clone());
        }
        for row in &changes.sets {
            last = self.sets.upsert(row.clone());
        }
        last
    }

    /// Returns every row across the three collections with version
    /// strictly above the watermark, soft-deleted rows included.
    #[must_use]
    pub fn changes_since(&self, watermark: Version) -> ChangeSet {
        ChangeSet {
            sessions: self.sessions.changes_since(watermark),
            exercises: self.exercises.changes_since(watermark),
            sets: self.sets.changes_since(watermark),
        }
    }

    /// Returns the total row count across the three collections,
    /// soft-deleted rows included.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sessions.len() + self.exercises.len() + self.sets.len()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("current_version", &self.current_version())
            .field("record_count", &self.record_count())
            .finish()
    }
}
