//! Collaborators owned by the host application.
//!
//! The feature never touches storage, settings files or the UI directly. A
//! host implements [`Vault`] for its note storage and trash, [`SettingsPersistence`]
//! for its key-value settings store, and [`Host`] to tie those together with
//! notification and status-bar primitives.

use crate::types::{DeleteMode, NoteFile};
use error::{PersistenceError, VaultError};
use std::path::{Path, PathBuf};
use toml::Table;

pub mod local;
pub mod memory;

pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum VaultError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Path is outside the vault: {0}")]
        OutsideVault(PathBuf),

        #[error("Note not found: {0}")]
        NotFound(PathBuf),

        #[error("Delete refused by host: {0}")]
        Refused(PathBuf),
    }

    #[derive(Debug, Error)]
    pub enum PersistenceError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Parse error: {0}")]
        Parse(#[from] toml::de::Error),

        #[error("Serialize error: {0}")]
        Serialize(#[from] toml::ser::Error),
    }
}

/// A node of the vault tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    Folder(VaultFolder),
    File(NoteFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFolder {
    /// Path relative to the vault root.
    pub path: PathBuf,
    pub children: Vec<VaultEntry>,
}

/// Note storage of the host.
pub trait Vault {
    /// Returns the node at a vault-relative path, or `None` if nothing exists there.
    fn entry(&self, path: &Path) -> Result<Option<VaultEntry>, VaultError>;

    /// Removes a note, either into the host trash or permanently.
    fn delete(&self, note: &NoteFile, mode: DeleteMode) -> Result<(), VaultError>;
}

/// Load-one / save-one store for the feature's settings blob.
pub trait SettingsPersistence {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Table>, PersistenceError>;

    fn save(&self, data: &Table) -> Result<(), PersistenceError>;
}

/// Everything the feature needs from the host application.
pub trait Host {
    type Vault: Vault;
    type Persistence: SettingsPersistence;

    fn vault(&self) -> &Self::Vault;

    fn persistence(&self) -> &Self::Persistence;

    /// Shows a transient, auto-dismissing message.
    fn notify(&self, message: &str);

    /// Sets the status-bar label. `None` clears it.
    fn set_status(&self, label: Option<&str>);
}
