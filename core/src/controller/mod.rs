//! Feature controller: owns the settings and reacts to host triggers.

use crate::cleanup::{self, CleanupOutcome};
use crate::error::{Error, Result};
use crate::host::error::PersistenceError;
use crate::host::{Host, SettingsPersistence};
use crate::scanner::{ClassifiedNote, classify_all, list_candidate_notes};
use crate::status::{self, EXPIRING_SOON_HORIZON_DAYS};
use crate::types::Settings;
use std::fmt;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};
use std::time::SystemTime;
use view::{COMMANDS, CommandDescriptor, DELETE_EXPIRED_NOTES, SettingsView};

pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Startup,
    Manual,
    Command,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Startup => write!(f, "startup"),
            Trigger::Manual => write!(f, "manual"),
            Trigger::Command => write!(f, "command"),
        }
    }
}

/// The expired-note cleanup feature, bound to a host.
///
/// All methods take `&self`; the controller can be shared between threads
/// when the host allows it. At most one cleanup runs at a time.
pub struct NoteExpiry<H> {
    host: H,
    settings: RwLock<Settings>,
    run_lock: Mutex<()>,
}

impl<H: Host> NoteExpiry<H> {
    /// Loads persisted settings on top of the defaults. A blob that cannot be
    /// parsed is treated as absent, so a damaged file can still be rewritten
    /// by the next edit.
    pub fn load(host: H) -> Result<Self> {
        let settings = match host.persistence().load() {
            Ok(Some(table)) => Settings::from_table(&table),
            Ok(None) => Settings::default(),
            Err(PersistenceError::Parse(e)) => {
                tracing::warn!(error = %e, "Unreadable settings blob, using defaults");
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(?settings, "Loaded settings");

        Ok(Self {
            host,
            settings: RwLock::new(settings),
            run_lock: Mutex::new(()),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Snapshot of the active settings.
    pub fn settings(&self) -> Settings {
        self.read_settings().clone()
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView::new(&self.read_settings())
    }

    pub fn commands(&self) -> &'static [CommandDescriptor] {
        COMMANDS
    }

    fn read_settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings(&self) -> RwLockWriteGuard<'_, Settings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cleanup triggers.
impl<H: Host> NoteExpiry<H> {
    /// Host finished starting up.
    pub fn on_ready(&self, now: SystemTime) -> Result<CleanupOutcome> {
        self.run(Trigger::Startup, now)
    }

    /// Icon or other direct UI activation.
    pub fn run_now(&self, now: SystemTime) -> Result<CleanupOutcome> {
        self.run(Trigger::Manual, now)
    }

    pub fn execute_command(&self, id: &str, now: SystemTime) -> Result<CleanupOutcome> {
        match id {
            DELETE_EXPIRED_NOTES => self.run(Trigger::Command, now),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }

    fn run(&self, trigger: Trigger, now: SystemTime) -> Result<CleanupOutcome> {
        let _guard = match self.run_lock.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!(%trigger, "Cleanup already running, ignoring trigger");
                return Err(Error::RunInProgress);
            }
        };

        let settings = self.settings();
        tracing::info!(
            %trigger,
            folder = %settings.target_folder,
            expiry_days = %settings.expiry_days,
            "Running expired note cleanup"
        );

        let result = cleanup::run(self.host.vault(), &settings, now);
        if let Ok(outcome) = &result {
            if let Some(message) = outcome.removed_message() {
                self.host.notify(&message);
            }
            if let Some(message) = outcome.failure_message() {
                self.host.notify(&message);
            }
            tracing::info!(
                removed = outcome.removed.len(),
                failed = outcome.failed.len(),
                "Cleanup finished"
            );
        }

        let refreshed = self.refresh_status_with(&settings, now);
        let outcome = result?;
        refreshed?;
        Ok(outcome)
    }
}

/// Status indicator and preview.
impl<H: Host> NoteExpiry<H> {
    /// Recomputes the expiring-soon count and pushes the label to the host.
    pub fn refresh_status(&self, now: SystemTime) -> Result<usize> {
        let settings = self.settings();
        self.refresh_status_with(&settings, now)
    }

    fn refresh_status_with(&self, settings: &Settings, now: SystemTime) -> Result<usize> {
        let candidates = list_candidate_notes(self.host.vault(), &settings.target_folder)?;
        let count = status::count_expiring_soon(
            &candidates,
            now,
            settings.expiry_days,
            EXPIRING_SOON_HORIZON_DAYS,
        );
        tracing::debug!(count, "Refreshed status");

        self.host.set_status(status::label(count).as_deref());
        Ok(count)
    }

    /// Classifies every candidate note without deleting anything.
    pub fn preview(&self, now: SystemTime) -> Result<Vec<ClassifiedNote>> {
        let settings = self.settings();
        let candidates = list_candidate_notes(self.host.vault(), &settings.target_folder)?;
        Ok(classify_all(
            candidates,
            now,
            settings.expiry_days,
            EXPIRING_SOON_HORIZON_DAYS,
        ))
    }
}

/// Settings panel edits. Each accepted edit is persisted immediately and
/// followed by a status refresh; a rejected edit changes nothing.
impl<H: Host> NoteExpiry<H> {
    pub fn set_target_folder(&self, input: &str, now: SystemTime) -> Result<()> {
        self.update_settings(now, |settings| {
            settings.set_target_folder(input);
            true
        })?;
        Ok(())
    }

    /// Returns `false` when `input` is not a positive integer.
    pub fn set_expiry_days(&self, input: &str, now: SystemTime) -> Result<bool> {
        self.update_settings(now, |settings| settings.set_expiry_days(input))
    }

    pub fn set_permanent_delete(&self, permanent: bool, now: SystemTime) -> Result<()> {
        self.update_settings(now, |settings| {
            settings.set_permanent_delete(permanent);
            true
        })?;
        Ok(())
    }

    fn update_settings(
        &self,
        now: SystemTime,
        edit: impl FnOnce(&mut Settings) -> bool,
    ) -> Result<bool> {
        let snapshot = {
            let mut settings = self.write_settings();
            if !edit(&mut settings) {
                tracing::debug!("Rejected invalid settings edit");
                return Ok(false);
            }
            // Saved under the write lock so concurrent edits persist in the
            // order they were applied.
            self.host.persistence().save(&settings.to_table())?;
            settings.clone()
        };

        self.refresh_status_with(&snapshot, now)?;
        Ok(true)
    }
}
