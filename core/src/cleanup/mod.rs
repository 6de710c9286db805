//! Deletes expired notes through the host vault.

use crate::host::Vault;
use crate::host::error::VaultError;
use crate::scanner::{is_expired, list_candidate_notes};
use crate::types::Settings;
use crate::types::note::notes_noun;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Debug)]
pub struct FailedDelete {
    pub path: PathBuf,
    pub error: VaultError,
}

/// What a cleanup run did. Nothing of it is persisted.
#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<FailedDelete>,
}

impl CleanupOutcome {
    /// Number of notes found expired, whether or not their delete succeeded.
    pub fn expired(&self) -> usize {
        self.removed.len() + self.failed.len()
    }

    /// `Removed N expired notes`, or `None` when nothing was removed.
    pub fn removed_message(&self) -> Option<String> {
        let count = self.removed.len();
        (count > 0).then(|| format!("Removed {count} expired {}", notes_noun(count)))
    }

    /// `Failed to remove N expired notes`, or `None` when every delete succeeded.
    pub fn failure_message(&self) -> Option<String> {
        let count = self.failed.len();
        (count > 0).then(|| format!("Failed to remove {count} expired {}", notes_noun(count)))
    }
}

/// Deletes every expired candidate note.
///
/// Each delete is independent: a note the host refuses to delete is recorded
/// in [`CleanupOutcome::failed`] and the remaining notes are still attempted.
/// Only a failure to list the target folder aborts the run.
pub fn run<V: Vault + ?Sized>(
    vault: &V,
    settings: &Settings,
    now: SystemTime,
) -> Result<CleanupOutcome, VaultError> {
    let candidates = list_candidate_notes(vault, &settings.target_folder)?;
    let mode = settings.delete_mode();

    let mut outcome = CleanupOutcome::default();
    for note in candidates
        .into_iter()
        .filter(|note| is_expired(note, now, settings.expiry_days))
    {
        match vault.delete(&note, mode) {
            Ok(()) => {
                tracing::info!(path = %note.path.display(), ?mode, "Removed expired note");
                outcome.removed.push(note.path);
            }
            Err(error) => {
                tracing::warn!(
                    path = %note.path.display(),
                    error = %error,
                    "Failed to remove expired note"
                );
                outcome.failed.push(FailedDelete {
                    path: note.path,
                    error,
                });
            }
        }
    }

    Ok(outcome)
}
