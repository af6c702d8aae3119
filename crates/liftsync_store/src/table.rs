//! Keyed versioned storage for one synced collection.

use crate::counter::VersionCounter;
use liftsync_protocol::{ExerciseRecord, SessionRecord, SetRecord, Version};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A record that participates in version-based replication.
///
/// The three synced collections implement this identically: a stable
/// client-generated id plus the server-assigned version stamp.
pub trait Replicated {
    /// The record's stable identifier, unique within its collection.
    fn id(&self) -> &str;

    /// The server-assigned version currently stamped on the record.
    fn version(&self) -> Version;

    /// Stamps the record with a freshly drawn version.
    fn set_version(&mut self, version: Version);
}

impl Replicated for SessionRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

impl Replicated for ExerciseRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

impl Replicated for SetRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

/// Keyed storage for one collection of replicated records.
///
/// Every write draws its version from the shared counter while holding
/// the table's write lock, so version assignment and the row write it
/// stamps form a single critical section. Reads take a consistent
/// snapshot under the read lock.
pub struct Table<R> {
    counter: Arc<VersionCounter>,
    rows: RwLock<HashMap<String, R>>,
}

impl<R: Replicated + Clone> Table<R> {
    /// Creates an empty table drawing versions from the given counter.
    pub fn new(counter: Arc<VersionCounter>) -> Self {
        Self {
            counter,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or overwrites the row keyed by its id, stamping it with a
    /// freshly drawn version. Returns the version assigned.
    ///
    /// An incoming row with its delete marker set is stored as-is; soft
    /// delete is just a field value and never removes the row.
    pub fn upsert(&self, mut row: R) -> Version {
        let mut rows = self.rows.write();
        let version = self.counter.next();
        row.set_version(version);
        rows.insert(row.id().to_string(), row);
        version
    }

    /// Applies a closure to the row with the given id, then stamps it
    /// with a fresh version. Returns the new version, or `None` if no
    /// such row exists.
    pub fn modify<F>(&self, id: &str, f: F) -> Option<Version>
    where
        F: FnOnce(&mut R),
    {
        let mut rows = self.rows.write();
        let row = rows.get_mut(id)?;
        f(row);
        let version = self.counter.next();
        row.set_version(version);
        Some(version)
    }

    /// Returns every row with version strictly above the watermark,
    /// soft-deleted rows included, ordered by version.
    pub fn changes_since(&self, watermark: Version) -> Vec<R> {
        let rows = self.rows.read();
        let mut out: Vec<R> = rows
            .values()
            .filter(|r| r.version() > watermark)
            .cloned()
            .collect();
        out.sort_by_key(Replicated::version);
        out
    }

    /// Returns the row with the given id, if present.
    pub fn get(&self, id: &str) -> Option<R> {
        self.rows.read().get(id).cloned()
    }

    /// Returns every row matching the predicate.
    pub fn select<F>(&self, pred: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        self.rows.read().values().filter(|r| pred(r)).cloned().collect()
    }

    /// Returns the number of rows, soft-deleted ones included.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}
