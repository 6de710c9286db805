//! In-memory host backends, for tests and previews.

use super::error::{PersistenceError, VaultError};
use super::{Host, SettingsPersistence, Vault, VaultEntry, VaultFolder};
use crate::types::{DeleteMode, NoteFile};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;
use toml::Table;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct VaultState {
    files: BTreeMap<PathBuf, NoteFile>,
    folders: BTreeSet<PathBuf>,
    refused: BTreeSet<PathBuf>,
    deletions: Vec<(PathBuf, DeleteMode)>,
}

impl VaultState {
    fn folder(&self, path: &Path) -> VaultFolder {
        let mut children = Vec::new();
        for folder in &self.folders {
            if folder.parent() == Some(path) {
                children.push(VaultEntry::Folder(self.folder(folder)));
            }
        }
        for (file_path, file) in &self.files {
            if file_path.parent() == Some(path) {
                children.push(VaultEntry::File(file.clone()));
            }
        }

        VaultFolder {
            path: path.to_path_buf(),
            children,
        }
    }
}

/// A vault whose notes carry explicit creation times.
///
/// Every delete request is recorded with its mode. Notes can be marked as
/// undeletable to simulate the host refusing an operation.
#[derive(Default)]
pub struct MemoryVault {
    state: Mutex<VaultState>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, path: impl AsRef<Path>) {
        let mut state = lock(&self.state);
        for ancestor in path.as_ref().ancestors() {
            state.folders.insert(ancestor.to_path_buf());
        }
    }

    /// Adds a file, creating its parent folders.
    pub fn add_file(&self, path: impl Into<PathBuf>, created_at: SystemTime) -> NoteFile {
        let file = NoteFile::new(path, created_at);
        if let Some(parent) = file.path.parent() {
            self.add_folder(parent);
        }
        lock(&self.state)
            .files
            .insert(file.path.clone(), file.clone());
        file
    }

    /// Makes every later delete of `path` fail with [`VaultError::Refused`].
    pub fn refuse_delete(&self, path: impl Into<PathBuf>) {
        lock(&self.state).refused.insert(path.into());
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        lock(&self.state).files.contains_key(path.as_ref())
    }

    /// Successful delete requests, in the order they were made.
    pub fn deletions(&self) -> Vec<(PathBuf, DeleteMode)> {
        lock(&self.state).deletions.clone()
    }
}

impl Vault for MemoryVault {
    fn entry(&self, path: &Path) -> Result<Option<VaultEntry>, VaultError> {
        let state = lock(&self.state);
        if let Some(file) = state.files.get(path) {
            return Ok(Some(VaultEntry::File(file.clone())));
        }
        if state.folders.contains(path) {
            return Ok(Some(VaultEntry::Folder(state.folder(path))));
        }
        Ok(None)
    }

    fn delete(&self, note: &NoteFile, mode: DeleteMode) -> Result<(), VaultError> {
        let mut state = lock(&self.state);
        if state.refused.contains(&note.path) {
            return Err(VaultError::Refused(note.path.clone()));
        }
        if state.files.remove(&note.path).is_none() {
            return Err(VaultError::NotFound(note.path.clone()));
        }
        state.deletions.push((note.path.clone(), mode));
        Ok(())
    }
}

/// Settings blob kept in memory.
#[derive(Default)]
pub struct MemoryPersistence {
    data: Mutex<Option<Table>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Table) -> Self {
        Self {
            data: Mutex::new(Some(data)),
        }
    }

    pub fn stored(&self) -> Option<Table> {
        lock(&self.data).clone()
    }
}

impl SettingsPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Table>, PersistenceError> {
        Ok(self.stored())
    }

    fn save(&self, data: &Table) -> Result<(), PersistenceError> {
        *lock(&self.data) = Some(data.clone());
        Ok(())
    }
}

/// A host that records notifications and the status label.
#[derive(Default)]
pub struct MemoryHost {
    pub vault: MemoryVault,
    pub persistence: MemoryPersistence,
    notifications: Mutex<Vec<String>>,
    status: Mutex<Option<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persistence(persistence: MemoryPersistence) -> Self {
        Self {
            persistence,
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        lock(&self.notifications).clone()
    }

    pub fn status(&self) -> Option<String> {
        lock(&self.status).clone()
    }
}

impl Host for MemoryHost {
    type Vault = MemoryVault;
    type Persistence = MemoryPersistence;

    fn vault(&self) -> &MemoryVault {
        &self.vault
    }

    fn persistence(&self) -> &MemoryPersistence {
        &self.persistence
    }

    fn notify(&self, message: &str) {
        lock(&self.notifications).push(message.to_string());
    }

    fn set_status(&self, label: Option<&str>) {
        *lock(&self.status) = label.map(str::to_string);
    }
}
