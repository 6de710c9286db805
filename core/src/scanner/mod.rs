//! Finds notes under the target folder and classifies them by age.

use crate::host::error::VaultError;
use crate::host::{Vault, VaultEntry};
use crate::types::{ExpiryClass, ExpiryDays, NoteFile};
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Length of `n` days.
pub fn days(n: u32) -> Duration {
    Duration::from_secs(u64::from(n) * 24 * 60 * 60)
}

/// Collects every note below `target_folder`, recursively.
///
/// An empty folder setting, a path that does not exist or a path that names a
/// file all yield an empty list: the feature is simply inactive. Order of the
/// result is unspecified.
pub fn list_candidate_notes<V: Vault + ?Sized>(
    vault: &V,
    target_folder: &str,
) -> Result<Vec<NoteFile>, VaultError> {
    let target_folder = target_folder.trim();
    if target_folder.is_empty() {
        return Ok(Vec::new());
    }

    let Some(VaultEntry::Folder(root)) = vault.entry(Path::new(target_folder))? else {
        tracing::debug!(folder = target_folder, "Target folder not found");
        return Ok(Vec::new());
    };

    let mut notes = Vec::new();
    let mut pending = vec![root];
    while let Some(folder) = pending.pop() {
        for child in folder.children {
            match child {
                VaultEntry::Folder(sub) => pending.push(sub),
                VaultEntry::File(file) if file.is_note() => notes.push(file),
                VaultEntry::File(_) => {}
            }
        }
    }

    tracing::debug!(folder = target_folder, count = notes.len(), "Listed candidate notes");
    Ok(notes)
}

/// `true` iff the note was created strictly before `now - expiry_days`.
/// A note exactly `expiry_days` old is not expired yet.
pub fn is_expired(note: &NoteFile, now: SystemTime, expiry_days: ExpiryDays) -> bool {
    match now.checked_sub(days(expiry_days.into_inner())) {
        Some(threshold) => note.created_at < threshold,
        // Threshold predates what SystemTime can represent.
        None => false,
    }
}

/// `true` iff the note was created strictly before
/// `now - (expiry_days - horizon_days)`.
///
/// When `horizon_days >= expiry_days` the threshold lies at or after `now`,
/// so the window covers every note created before it, expired ones included.
/// Callers classify with [`classify`] to keep expired notes out of the count.
pub fn expires_within(
    note: &NoteFile,
    now: SystemTime,
    expiry_days: ExpiryDays,
    horizon_days: u32,
) -> bool {
    let expiry_days = expiry_days.into_inner();
    if horizon_days < expiry_days {
        now.checked_sub(days(expiry_days - horizon_days))
            .is_some_and(|threshold| note.created_at < threshold)
    } else {
        now.checked_add(days(horizon_days - expiry_days))
            .is_none_or(|threshold| note.created_at < threshold)
    }
}

pub fn classify(
    note: &NoteFile,
    now: SystemTime,
    expiry_days: ExpiryDays,
    horizon_days: u32,
) -> ExpiryClass {
    if is_expired(note, now, expiry_days) {
        ExpiryClass::Expired
    } else if expires_within(note, now, expiry_days, horizon_days) {
        ExpiryClass::ExpiringSoon
    } else {
        ExpiryClass::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedNote {
    pub note: NoteFile,
    pub class: ExpiryClass,
}

pub fn classify_all(
    notes: Vec<NoteFile>,
    now: SystemTime,
    expiry_days: ExpiryDays,
    horizon_days: u32,
) -> Vec<ClassifiedNote> {
    notes
        .into_iter()
        .map(|note| {
            let class = classify(&note, now, expiry_days, horizon_days);
            ClassifiedNote { note, class }
        })
        .collect()
}
