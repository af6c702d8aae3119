//! # liftsync Protocol
//!
//! Sync protocol types and JSON codecs for liftsync.
//!
//! This crate provides:
//! - The three synced record types (`SessionRecord`, `ExerciseRecord`, `SetRecord`)
//! - Domain enums (`Unit`, `Category`, `SessionStatus`) and the tagged
//!   soft-delete state (`DeleteState`)
//! - The `Version` ordering key assigned by the server
//! - Request/response messages for the sync and registration exchanges
//! - Input validation for inbound change batches
//!
//! This is a pure protocol crate with no I/O operations. Wire shapes use
//! camelCase JSON keys so payloads stay compatible with existing clients.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod messages;
mod records;
mod validate;
mod version;

pub use messages::{
    AttachRequest, ChangeSet, RegisterRequest, RegisterResponse, SyncRequest, SyncResponse,
};
pub use records::{
    Category, DeleteState, ExerciseRecord, SessionRecord, SessionStatus, SetRecord, Unit,
};
pub use validate::{Validate, ValidationError};
pub use version::Version;
