//! # liftsync Server
//!
//! Sync backend for the liftsync workout tracker.
//!
//! This crate provides:
//! - `DeviceAuth`, the user/device/token registry behind registration
//! - `SyncHandler`, one synchronization exchange end to end
//! - `SyncServer`, the facade a transport layer calls into
//!
//! # Protocol
//!
//! A client calls sync with its last known version and a batch of local
//! changes. The server validates the token/device pair, applies the
//! inbound rows (each write drawing a fresh version), then returns every
//! row above the client's watermark together with the new server version.
//! Conflict resolution is last-write-wins by server-assigned version.
//!
//! The HTTP boundary is out of scope; `SyncServer` is what a transport
//! layer would dispatch requests to.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod auth;
mod config;
mod error;
mod handler;
mod server;

pub use auth::{Credentials, DeviceAuth, Token};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::SyncHandler;
pub use server::SyncServer;
