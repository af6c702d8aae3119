//! The monotonic version source.

use liftsync_protocol::Version;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide monotonic version counter.
///
/// Every mutation of a synced record draws its version from here. The
/// counter is a dedicated atomic sequence rather than a recomputation of
/// the maximum stored version: `next()` is a single fetch-add, so repeated
/// calls climb strictly even before any row carrying the previous value
/// has been persisted, and concurrent callers can never receive the same
/// version twice.
#[derive(Debug, Default)]
pub struct VersionCounter {
    current: AtomicU64,
}

impl VersionCounter {
    /// Creates a counter starting at zero (nothing assigned yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter seeded with the highest version already issued,
    /// for reconstructing a store from existing rows.
    #[must_use]
    pub fn with_current(version: Version) -> Self {
        Self {
            current: AtomicU64::new(version.as_u64()),
        }
    }

    /// Returns the highest version ever issued, or zero when fresh.
    #[must_use]
    pub fn current(&self) -> Version {
        Version::new(self.current.load(Ordering::SeqCst))
    }

    /// Issues the next version, strictly greater than every prior one.
    #[must_use]
    pub fn next(&self) -> Version {
        Version::new(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
