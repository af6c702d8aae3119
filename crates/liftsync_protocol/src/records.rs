//! Synced record types.
//!
//! Each record carries the client-generated `id`, the owning `deviceId`,
//! the advisory `updatedAt` wall-clock timestamp, the tagged soft-delete
//! state, and the server-assigned `version`. The `version` field defaults
//! to zero on inbound rows; the server stamps a fresh one on every upsert.

use crate::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Measurement unit for a set or an exercise default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Kilograms.
    Kg,
    /// Pounds.
    Lb,
    /// Seconds (timed exercises).
    Sec,
    /// Minutes (timed exercises).
    Min,
}

/// Body-area category of an exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Upper body.
    Upper,
    /// Lower body.
    Lower,
    /// Core.
    Core,
    /// Anything else.
    #[default]
    Other,
}

/// Lifecycle status of a training session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The session is still being recorded. An ended session that is
    /// uploaded again as in-progress is treated as a continuation.
    #[default]
    InProgress,
    /// The session has been ended by the client.
    Ended,
}

/// Soft-delete state of a record.
///
/// Deleted rows are never physically removed; they keep participating in
/// version-based diffing so deletions propagate to other devices. On the
/// wire this is a nullable millisecond timestamp under the `deletedAt` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteState {
    /// The record is live.
    #[default]
    Live,
    /// The record was logically deleted at the given wall-clock time.
    Deleted {
        /// Deletion time in milliseconds since the Unix epoch.
        at: u64,
    },
}

impl DeleteState {
    /// Returns true if the record is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, DeleteState::Deleted { .. })
    }

    /// Returns the deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<u64> {
        match self {
            DeleteState::Live => None,
            DeleteState::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<u64>> for DeleteState {
    fn from(at: Option<u64>) -> Self {
        match at {
            None => DeleteState::Live,
            Some(at) => DeleteState::Deleted { at },
        }
    }
}

impl Serialize for DeleteState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.deleted_at().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeleteState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.into())
    }
}

/// A recorded training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Client-generated stable identifier.
    pub id: String,
    /// Start time in milliseconds since the Unix epoch.
    pub started_at: u64,
    /// End time in milliseconds, absent while in progress.
    #[serde(default)]
    pub ended_at: Option<u64>,
    /// Session lifecycle status.
    #[serde(default)]
    pub status: SessionStatus,
    /// Soft-delete state.
    #[serde(default, rename = "deletedAt")]
    pub deleted: DeleteState,
    /// Client wall-clock time of the last write, advisory only.
    pub updated_at: u64,
    /// Device that last wrote this record.
    pub device_id: String,
    /// Server-assigned version, zero on inbound rows.
    #[serde(default)]
    pub version: Version,
}

/// An exercise definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    /// Client-generated stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Body-area category.
    #[serde(default)]
    pub category: Category,
    /// Suggested default weight.
    #[serde(default)]
    pub default_weight: Option<f64>,
    /// Suggested default rep count.
    #[serde(default)]
    pub default_reps: Option<u32>,
    /// Suggested default unit.
    #[serde(default)]
    pub default_unit: Option<Unit>,
    /// Legacy favourite flag, carried for client compatibility.
    #[serde(default)]
    pub is_favorite: Option<bool>,
    /// Legacy manual sort order, carried for client compatibility.
    #[serde(default)]
    pub sort_order: Option<i64>,
    /// Soft-delete state.
    #[serde(default, rename = "deletedAt")]
    pub deleted: DeleteState,
    /// Client wall-clock time of the last write, advisory only.
    pub updated_at: u64,
    /// Device that last wrote this record.
    pub device_id: String,
    /// Server-assigned version, zero on inbound rows.
    #[serde(default)]
    pub version: Version,
}

/// A single recorded set within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    /// Client-generated stable identifier.
    pub id: String,
    /// The session this set belongs to.
    pub session_id: String,
    /// The exercise performed.
    pub exercise_id: String,
    /// Weight lifted, in the set's unit.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Repetition count.
    #[serde(default)]
    pub reps: Option<u32>,
    /// Measurement unit.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// Rate of perceived exertion.
    #[serde(default)]
    pub rpe: Option<f64>,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Soft-delete state.
    #[serde(default, rename = "deletedAt")]
    pub deleted: DeleteState,
    /// Client wall-clock time of the last write, advisory only.
    pub updated_at: u64,
    /// Device that last wrote this record.
    pub device_id: String,
    /// Server-assigned version, zero on inbound rows.
    #[serde(default)]
    pub version: Version,
}
