//! Device registration and token verification.
//!
//! Binds opaque device identifiers to users and issues bearer tokens.
//! Registration is idempotent per device; attaching a device to an
//! existing user always re-issues. Tokens carry no expiry, since the
//! protocol defines none.

use crate::error::{ServerError, ServerResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// A user: the identity anchor. Never mutated, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)] // id kept for parity with the stored row shape
struct User {
    id: String,
}

/// A client installation bound to a user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
struct Device {
    id: String,
    user_id: String,
}

/// Bearer credential binding a device to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The opaque token value.
    pub token: String,
    /// The owning user.
    pub user_id: String,
    /// The bound device.
    pub device_id: String,
}

/// The `(userId, deviceId, token)` triple returned by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The owning user.
    pub user_id: String,
    /// The registered device.
    pub device_id: String,
    /// Bearer token for sync calls.
    pub token: String,
}

#[derive(Default)]
struct AuthState {
    users: HashMap<String, User>,
    devices: HashMap<String, Device>,
    /// Keyed by token value. At most one live token per device; the
    /// re-issuance path replaces rather than accumulates.
    tokens: HashMap<String, Token>,
}

impl AuthState {
    fn token_for_device(&self, device_id: &str) -> Option<&Token> {
        self.tokens.values().find(|t| t.device_id == device_id)
    }
}

/// Registry of users, devices, and bearer tokens.
#[derive(Default)]
pub struct DeviceAuth {
    state: RwLock<AuthState>,
}

impl DeviceAuth {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device, generating an id if none is supplied.
    ///
    /// Idempotent: if a live token already exists for the device, the
    /// stored `(userId, deviceId, token)` triple is returned unchanged
    /// and no new user or token is created. Otherwise a new user is
    /// created, the device bound to it, and a token issued.
    pub fn register_device(&self, device_id: Option<String>) -> Credentials {
        let device_id = device_id.unwrap_or_else(new_id);
        let mut state = self.state.write();

        if let Some(existing) = state.token_for_device(&device_id) {
            info!(device = %device_id, "register_device: reusing existing token");
            return Credentials {
                user_id: existing.user_id.clone(),
                device_id,
                token: existing.token.clone(),
            };
        }

        let user_id = new_id();
        let token = new_id();
        state.users.insert(user_id.clone(), User {
            id: user_id.clone(),
        });
        state.devices.insert(device_id.clone(), Device {
            id: device_id.clone(),
            user_id: user_id.clone(),
        });
        state.tokens.insert(token.clone(), Token {
            token: token.clone(),
            user_id: user_id.clone(),
            device_id: device_id.clone(),
        });

        info!(user = %user_id, device = %device_id, "register_device: new registration");
        Credentials {
            user_id,
            device_id,
            token,
        }
    }

    /// Binds a (possibly new) device to an existing user and always
    /// issues a fresh token, superseding any token the device held.
    ///
    /// Unlike `register_device` this is the deliberate re-issuance path.
    /// Fails with `NotFound` if the user does not exist, and with
    /// `Unauthorized` if the device is already bound to another user.
    pub fn attach_device(
        &self,
        user_id: &str,
        device_id: Option<String>,
    ) -> ServerResult<Credentials> {
        let device_id = device_id.unwrap_or_else(new_id);
        let mut state = self.state.write();

        if !state.users.contains_key(user_id) {
            return Err(ServerError::not_found(format!("unknown user {user_id}")));
        }
        if let Some(device) = state.devices.get(&device_id) {
            if device.user_id != user_id {
                return Err(ServerError::unauthorized(format!(
                    "device {device_id} is bound to another user"
                )));
            }
        } else {
            state.devices.insert(device_id.clone(), Device {
                id: device_id.clone(),
                user_id: user_id.to_string(),
            });
        }

        state.tokens.retain(|_, t| t.device_id != device_id);
        let token = new_id();
        state.tokens.insert(token.clone(), Token {
            token: token.clone(),
            user_id: user_id.to_string(),
            device_id: device_id.clone(),
        });

        info!(user = %user_id, device = %device_id, "attach_device: fresh token issued");
        Ok(Credentials {
            user_id: user_id.to_string(),
            device_id,
            token,
        })
    }

    /// Verifies that the token exists and is bound to the given device.
    pub fn verify(&self, token: &str, device_id: &str) -> ServerResult<Token> {
        let state = self.state.read();
        match state.tokens.get(token) {
            Some(t) if t.device_id == device_id => Ok(t.clone()),
            _ => Err(ServerError::unauthorized("invalid token/device")),
        }
    }

    /// Returns the number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    /// Returns the number of issued tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.state.read().tokens.len()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
