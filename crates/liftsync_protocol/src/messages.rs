//! Protocol messages for the sync and registration exchanges.

use crate::records::{ExerciseRecord, SessionRecord, SetRecord};
use crate::version::Version;
use serde::{Deserialize, Serialize};

/// A batch of changes across the three synced collections.
///
/// Used both for inbound client pushes and for the outbound delta the
/// server returns. All three lists default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Changed training sessions.
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    /// Changed exercise definitions.
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
    /// Changed recorded sets.
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no collection carries any rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.exercises.is_empty() && self.sets.is_empty()
    }

    /// Returns the total number of rows across the three collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len() + self.exercises.len() + self.sets.len()
    }

    /// Returns the highest version stamped on any row in the set.
    #[must_use]
    pub fn max_version(&self) -> Version {
        let sessions = self.sessions.iter().map(|r| r.version);
        let exercises = self.exercises.iter().map(|r| r.version);
        let sets = self.sets.iter().map(|r| r.version);
        sessions
            .chain(exercises)
            .chain(sets)
            .max()
            .unwrap_or(Version::ZERO)
    }
}

/// One synchronization exchange from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// The calling device.
    pub device_id: String,
    /// Bearer token issued at registration.
    pub token: String,
    /// The client's watermark: the highest version it has already received.
    /// Zero (or absent) requests a full resync.
    #[serde(default)]
    pub last_version: Version,
    /// Local changes to push, possibly empty.
    #[serde(default)]
    pub changes: ChangeSet,
}

/// Server response to a synchronization exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    /// The watermark the client should adopt for its next sync call.
    /// Greater than or equal to every version in `changes`, and covers
    /// no committed row the `changes` delta omits.
    pub server_version: Version,
    /// Every row with version strictly above the request's watermark,
    /// soft-deleted rows included.
    pub changes: ChangeSet,
}

/// Device registration request. Idempotent per device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Existing device id to register, or absent to have one generated.
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Request to attach a (possibly new) device to an existing user.
///
/// Unlike registration this always issues a fresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRequest {
    /// The user to bind the device to.
    pub user_id: String,
    /// Device id to attach, or absent to have one generated.
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Credentials returned by registration and attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// The owning user.
    pub user_id: String,
    /// The registered device.
    pub device_id: String,
    /// Bearer token binding the device to the user.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SessionRecord;

    fn make_session(id: &str, version: u64) -> SessionRecord {
        SessionRecord {
            id: id.into(),
            started_at: 1000,
            ended_at: None,
            status: Default::default(),
            deleted: Default::default(),
            updated_at: 1000,
            device_id: "dev-a".into(),
            version: Version::new(version),
        }
    }

    #[test]
    fn change_set_empty_and_len() {
        let mut changes = ChangeSet::new();
        assert!(changes.is_empty());
        assert_eq!(changes.len(), 0);

        changes.sessions.push(make_session("s1", 1));
        assert!(!changes.is_empty());
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn change_set_max_version() {
        let mut changes = ChangeSet::new();
        assert_eq!(changes.max_version(), Version::ZERO);

        changes.sessions.push(make_session("s1", 3));
        changes.sessions.push(make_session("s2", 7));
        assert_eq!(changes.max_version(), Version::new(7));
    }

    #[test]
    fn sync_request_defaults() {
        let json = r#"{"deviceId": "dev-a", "token": "t1"}"#;
        let request: SyncRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.device_id, "dev-a");
        assert_eq!(request.last_version, Version::ZERO);
        assert!(request.changes.is_empty());
    }

    #[test]
    fn sync_response_wire_shape() {
        let response = SyncResponse {
            server_version: Version::new(5),
            changes: ChangeSet::new(),
        };

        let out = serde_json::to_value(&response).unwrap();
        assert_eq!(out["serverVersion"], 5);
        assert!(out["changes"]["sessions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn register_request_device_id_optional() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.device_id.is_none());

        let request: RegisterRequest =
            serde_json::from_str(r#"{"deviceId": "dev-a"}"#).unwrap();
        assert_eq!(request.device_id.as_deref(), Some("dev-a"));
    }
}
