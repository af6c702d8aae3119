//! The server facade.

use crate::auth::{Credentials, DeviceAuth};
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::SyncHandler;
use liftsync_protocol::{
    AttachRequest, ExerciseRecord, RegisterRequest, RegisterResponse, SessionRecord, SyncRequest,
    SyncResponse, Version,
};
use liftsync_store::RecordStore;
use std::sync::Arc;
use tracing::info;

/// The complete sync backend: registry, store, and exchange logic
/// behind one set of entry points.
///
/// A transport layer (HTTP, test harness, embedded caller) constructs
/// one `SyncServer` and dispatches decoded requests to it. All entry
/// points take `&self` and are safe to call from multiple threads.
pub struct SyncServer {
    auth: Arc<DeviceAuth>,
    store: Arc<RecordStore>,
    handler: SyncHandler,
}

impl SyncServer {
    /// Creates a server with an empty store and registry.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(RecordStore::new()))
    }

    /// Creates a server over an existing store, e.g. one seeded from a
    /// snapshot.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<RecordStore>) -> Self {
        let auth = Arc::new(DeviceAuth::new());
        let handler = SyncHandler::new(config, Arc::clone(&auth), Arc::clone(&store));
        info!(
            server_version = store.current_version().as_u64(),
            records = store.record_count(),
            "sync server ready"
        );
        Self {
            auth,
            store,
            handler,
        }
    }

    /// Registers a device and returns its credentials. Idempotent per
    /// device id.
    pub fn handle_register(&self, request: RegisterRequest) -> RegisterResponse {
        let creds = self.auth.register_device(request.device_id);
        RegisterResponse {
            user_id: creds.user_id,
            device_id: creds.device_id,
            token: creds.token,
        }
    }

    /// Attaches a device to an existing user, always issuing a fresh
    /// token.
    pub fn handle_attach(&self, request: AttachRequest) -> ServerResult<RegisterResponse> {
        let Credentials {
            user_id,
            device_id,
            token,
        } = self.auth.attach_device(&request.user_id, request.device_id)?;
        Ok(RegisterResponse {
            user_id,
            device_id,
            token,
        })
    }

    /// Runs one push/pull exchange.
    pub fn handle_sync(&self, request: SyncRequest) -> ServerResult<SyncResponse> {
        self.handler.handle_sync(request)
    }

    /// Reopens the device's most recently updated session.
    pub fn handle_continue_session(
        &self,
        device_id: &str,
        token: &str,
    ) -> ServerResult<SessionRecord> {
        self.handler.continue_latest_session(device_id, token)
    }

    /// Lists the distinct exercises from the device's recent sessions.
    pub fn handle_recent_exercises(
        &self,
        device_id: &str,
        token: &str,
    ) -> ServerResult<Vec<ExerciseRecord>> {
        self.handler.recent_exercises(device_id, token)
    }

    /// The highest version any write has been stamped with so far.
    #[must_use]
    pub fn server_version(&self) -> Version {
        self.store.current_version()
    }

    /// Total number of stored rows across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.store.record_count()
    }
}
