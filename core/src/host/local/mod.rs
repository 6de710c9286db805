//! File-system host backends.

use super::error::{PersistenceError, VaultError};
use super::{SettingsPersistence, Vault, VaultEntry, VaultFolder};
use crate::types::{DeleteMode, NoteFile};
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use toml::Table;

/// Directory under the vault root that receives trashed notes.
pub const TRASH_DIR: &str = ".trash";

/// A vault backed by a directory on disk.
///
/// Dot-prefixed entries (the trash, settings directories) are hidden from the
/// tree, so they are never scanned.
pub struct LocalVault {
    root: PathBuf,
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

/// Birth time where the file system records it, modification time otherwise.
fn created_at(metadata: &fs::Metadata) -> std::io::Result<SystemTime> {
    metadata.created().or_else(|_| metadata.modified())
}

impl LocalVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trash_path(&self) -> PathBuf {
        self.root.join(TRASH_DIR)
    }

    /// Maps a vault-relative path to disk. `None` for absolute paths or paths
    /// that climb out of the root.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        path.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            .then(|| self.root.join(path))
    }

    fn read_entry(
        &self,
        rel: PathBuf,
        abs: &Path,
        metadata: &fs::Metadata,
    ) -> Result<VaultEntry, VaultError> {
        if !metadata.is_dir() {
            return Ok(VaultEntry::File(NoteFile::new(rel, created_at(metadata)?)));
        }

        let mut children = Vec::new();
        for dir_entry in fs::read_dir(abs)? {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name();
            if is_hidden(&name) {
                continue;
            }

            let child_abs = dir_entry.path();
            let child = dir_entry
                .metadata()
                .map_err(VaultError::from)
                .and_then(|child_metadata| {
                    if child_metadata.file_type().is_symlink() {
                        return Ok(None);
                    }
                    self.read_entry(rel.join(&name), &child_abs, &child_metadata)
                        .map(Some)
                });

            match child {
                Ok(Some(child)) => children.push(child),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %child_abs.display(),
                        error = %e,
                        "Skipping unreadable vault entry"
                    );
                }
            }
        }

        Ok(VaultEntry::Folder(VaultFolder {
            path: rel,
            children,
        }))
    }

    /// Destination inside the trash, keeping the note's relative path.
    /// Collisions get ` 1`, ` 2`, ... appended to the file stem.
    fn trash_destination(&self, rel: &Path) -> PathBuf {
        let base = self.trash_path().join(rel);
        if !base.exists() {
            return base;
        }

        let stem = base
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = base
            .extension()
            .map(|e| e.to_string_lossy().into_owned());

        let mut n = 1u32;
        loop {
            let file_name = match &extension {
                Some(ext) => format!("{stem} {n}.{ext}"),
                None => format!("{stem} {n}"),
            };
            let candidate = base.with_file_name(file_name);
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Vault for LocalVault {
    fn entry(&self, path: &Path) -> Result<Option<VaultEntry>, VaultError> {
        let Some(abs) = self.resolve(path) else {
            return Ok(None);
        };

        let metadata = match fs::metadata(&abs) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.read_entry(path.to_path_buf(), &abs, &metadata).map(Some)
    }

    fn delete(&self, note: &NoteFile, mode: DeleteMode) -> Result<(), VaultError> {
        let source = self
            .resolve(&note.path)
            .ok_or_else(|| VaultError::OutsideVault(note.path.clone()))?;
        if !source.is_file() {
            return Err(VaultError::NotFound(note.path.clone()));
        }

        match mode {
            DeleteMode::Permanent => fs::remove_file(&source)?,
            DeleteMode::Trash => {
                let destination = self.trash_destination(&note.path);
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::rename(&source, &destination)?;
            }
        }
        Ok(())
    }
}

/// Settings blob stored as a TOML file.
pub struct TomlSettingsFile {
    path: PathBuf,
}

impl TomlSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl SettingsPersistence for TomlSettingsFile {
    fn load(&self) -> Result<Option<Table>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    fn save(&self, data: &Table) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(data)?;
        // Write then rename, so a crash never leaves a truncated file behind.
        let temp_path = self.temp_path();
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
