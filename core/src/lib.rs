//! Expiry cleanup for notes kept in a designated folder.
//!
//! The feature scans a folder of the host application's vault, deletes notes
//! whose creation time is older than the configured number of days and keeps
//! a status label counting the notes that will expire soon. Everything the
//! host owns (storage, trash, settings persistence, notifications) is reached
//! through the traits in [`host`].

pub mod cleanup;
pub mod controller;
mod error;
pub mod host;
pub mod scanner;
pub mod status;
pub mod types;

pub use controller::NoteExpiry;
pub use error::{Error, Result};
