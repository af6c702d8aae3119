//! Server-assigned version numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing version assigned by the server to every mutation.
///
/// Versions provide total ordering of committed changes across all three
/// collections. A client's watermark (`lastVersion`) is the highest version
/// it has already received; the sync delta is everything strictly above it.
///
/// The wall-clock `updatedAt` field on records is advisory only; `Version`
/// is the ordering authority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(pub u64);

impl Version {
    /// The zero version, below every version the server ever assigns.
    ///
    /// A watermark of `ZERO` requests a full resync.
    pub const ZERO: Version = Version(0);

    /// Creates a version from a raw value.
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    /// Returns the raw version value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next version.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v:{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<Version> for u64 {
    fn from(v: Version) -> Self {
        v.0
    }
}
