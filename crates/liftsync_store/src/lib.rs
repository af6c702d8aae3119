//! # liftsync Store
//!
//! Versioned in-memory record store for liftsync.
//!
//! This crate provides:
//! - `VersionCounter`, the process-wide monotonic version source
//! - `Table<R>`, keyed versioned storage for one synced collection
//! - `RecordStore`, the three collections behind one upsert/query contract
//!
//! The store never hard-deletes on the sync path: soft-deleted rows keep
//! their place in the tables and keep participating in version-based
//! diffing so deletions propagate to other devices.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod counter;
mod store;
mod table;

pub use counter::VersionCounter;
pub use store::RecordStore;
pub use table::{Replicated, Table};
