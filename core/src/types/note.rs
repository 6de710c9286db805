use std::path::PathBuf;
use std::time::SystemTime;

/// Extension of the files treated as notes. Other files are never touched.
pub const NOTE_EXTENSION: &str = "md";

/// A file reported by the host vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Path relative to the vault root.
    pub path: PathBuf,
    pub extension: String,
    /// Creation time. Edits do not move it, so they do not reset the expiry clock.
    pub created_at: SystemTime,
}

impl NoteFile {
    pub fn new(path: impl Into<PathBuf>, created_at: SystemTime) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            path,
            extension,
            created_at,
        }
    }

    pub fn is_note(&self) -> bool {
        self.extension == NOTE_EXTENSION
    }
}

/// How the host should get rid of an expired note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteMode {
    /// Move to the host's recoverable trash area.
    Trash,
    /// Irreversible removal.
    Permanent,
}

impl DeleteMode {
    pub fn from_permanent(permanent: bool) -> Self {
        if permanent {
            DeleteMode::Permanent
        } else {
            DeleteMode::Trash
        }
    }
}

/// "note" or "notes" depending on `count`.
pub(crate) fn notes_noun(count: usize) -> &'static str {
    if count == 1 { "note" } else { "notes" }
}
