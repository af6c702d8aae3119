//! The synchronization exchange.

use crate::auth::DeviceAuth;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use liftsync_protocol::{
    ExerciseRecord, SessionRecord, SessionStatus, SyncRequest, SyncResponse, Validate,
};
use liftsync_store::RecordStore;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Orchestrates one synchronization exchange.
///
/// Order of operations: verify the token/device pair, validate the whole
/// inbound batch (a single malformed row rejects the call before any
/// write), apply inbound rows in the order supplied, then compute the
/// outbound delta above the client's watermark. The returned server
/// version is derived from the delta itself, never from the live
/// counter: the counter may already cover rows a concurrent call
/// committed after this call's snapshot, and a watermark advanced past
/// them would filter them out of every future delta.
pub struct SyncHandler {
    config: ServerConfig,
    auth: Arc<DeviceAuth>,
    store: Arc<RecordStore>,
}

impl SyncHandler {
    /// Creates a handler over the given registry and store.
    pub fn new(config: ServerConfig, auth: Arc<DeviceAuth>, store: Arc<RecordStore>) -> Self {
        Self {
            config,
            auth,
            store,
        }
    }

    /// Handles a sync request: push inbound changes, pull the delta.
    pub fn handle_sync(&self, request: SyncRequest) -> ServerResult<SyncResponse> {
        self.auth.verify(&request.token, &request.device_id)?;

        if request.changes.len() > self.config.max_push_batch as usize {
            return Err(ServerError::invalid_request(format!(
                "batch of {} rows exceeds limit {}",
                request.changes.len(),
                self.config.max_push_batch
            )));
        }

        // All rows checked before any write, so a bad row cannot leave
        // the batch partially applied.
        request.changes.validate()?;

        let applied = self.store.apply(&request.changes);

        // The new watermark must cover exactly what this response
        // carries: the client's old watermark, the highest version in
        // the delta, and this call's own last stamped write. Rows a
        // concurrent call commits around our snapshot stay above it
        // and surface in the next delta.
        let changes = self.store.changes_since(request.last_version);
        let server_version = request
            .last_version
            .max(changes.max_version())
            .max(applied);

        debug!(
            device = %request.device_id,
            pushed = request.changes.len(),
            pulled = changes.len(),
            server_version = server_version.as_u64(),
            "sync exchange complete"
        );

        Ok(SyncResponse {
            server_version,
            changes,
        })
    }

    /// Reopens the device's most recently updated session: status back
    /// to in-progress, end time cleared, fresh version drawn so the
    /// change propagates to the device's other installs.
    pub fn continue_latest_session(
        &self,
        device_id: &str,
        token: &str,
    ) -> ServerResult<SessionRecord> {
        self.auth.verify(token, device_id)?;

        let latest = self
            .store
            .sessions()
            .select(|s| s.device_id == device_id)
            .into_iter()
            .max_by_key(|s| (s.updated_at, s.version));

        let Some(latest) = latest else {
            return Err(ServerError::not_found(format!(
                "no session for device {device_id}"
            )));
        };

        let now = now_millis();
        self.store.sessions().modify(&latest.id, |s| {
            s.status = SessionStatus::InProgress;
            s.ended_at = None;
            s.updated_at = now;
        });

        self.store
            .sessions()
            .get(&latest.id)
            .ok_or_else(|| ServerError::not_found(format!("session {} vanished", latest.id)))
    }

    /// Returns the distinct exercises used in the device's most recent
    /// live sessions, newest first. Soft-deleted sessions, sets, and
    /// exercises are excluded: this is a read path, not a sync path.
    pub fn recent_exercises(
        &self,
        device_id: &str,
        token: &str,
    ) -> ServerResult<Vec<ExerciseRecord>> {
        self.auth.verify(token, device_id)?;

        let mut sessions = self
            .store
            .sessions()
            .select(|s| s.device_id == device_id && !s.deleted.is_deleted());
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions.truncate(self.config.recent_sessions as usize);

        let session_ids: HashSet<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        let mut sets = self
            .store
            .sets()
            .select(|z| session_ids.contains(z.session_id.as_str()) && !z.deleted.is_deleted());
        sets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        // Deduplicate exercise ids in most-recently-used order.
        let mut seen = HashSet::new();
        let mut ordered_ids = Vec::new();
        for set in &sets {
            if seen.insert(set.exercise_id.as_str()) {
                ordered_ids.push(set.exercise_id.as_str());
            }
            if ordered_ids.len() >= self.config.recent_exercises_max as usize {
                break;
            }
        }

        let exercises = ordered_ids
            .into_iter()
            .filter_map(|id| self.store.exercises().get(id))
            .filter(|e| !e.deleted.is_deleted())
            .collect();

        Ok(exercises)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
