//! End-to-end runs over a vault on disk.

use lapse_core::NoteExpiry;
use lapse_core::host::Host;
use lapse_core::host::local::{LocalVault, TomlSettingsFile};
use lapse_core::scanner::days;
use lapse_core::types::Settings;
use std::cell::RefCell;
use std::time::SystemTime;
use tempfile::TempDir;

struct DiskHost {
    vault: LocalVault,
    settings: TomlSettingsFile,
    notifications: RefCell<Vec<String>>,
    status: RefCell<Option<String>>,
}

impl Host for DiskHost {
    type Vault = LocalVault;
    type Persistence = TomlSettingsFile;

    fn vault(&self) -> &LocalVault {
        &self.vault
    }

    fn persistence(&self) -> &TomlSettingsFile {
        &self.settings
    }

    fn notify(&self, message: &str) {
        self.notifications.borrow_mut().push(message.to_string());
    }

    fn set_status(&self, label: Option<&str>) {
        *self.status.borrow_mut() = label.map(str::to_string);
    }
}

fn create_host(dir: &TempDir) -> DiskHost {
    DiskHost {
        vault: LocalVault::new(dir.path()),
        settings: TomlSettingsFile::new(dir.path().join(".lapse/settings.toml")),
        notifications: RefCell::new(Vec::new()),
        status: RefCell::new(None),
    }
}

fn write_note(dir: &TempDir, rel: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "# note").unwrap();
}

fn configure(feature: &NoteExpiry<DiskHost>, folder: &str, expiry_days: &str) {
    let now = SystemTime::now();
    feature.set_target_folder(folder, now).unwrap();
    assert!(feature.set_expiry_days(expiry_days, now).unwrap());
}

#[test]
fn test_settings_survive_reload() {
    let dir = TempDir::new().unwrap();
    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    let now = SystemTime::now();

    feature.set_target_folder("Inbox", now).unwrap();
    feature.set_expiry_days("14", now).unwrap();
    feature.set_permanent_delete(true, now).unwrap();
    let saved = feature.settings();

    let reloaded = NoteExpiry::load(create_host(&dir)).unwrap();

    assert_eq!(reloaded.settings(), saved);
    assert_eq!(reloaded.settings().expiry_days.into_inner(), 14);
}

#[test]
fn test_notes_past_expiry_are_moved_to_trash() {
    let dir = TempDir::new().unwrap();
    write_note(&dir, "Inbox/Scratch/a.md");
    write_note(&dir, "Inbox/b.md");
    write_note(&dir, "Inbox/keep.txt");
    write_note(&dir, "Elsewhere/c.md");

    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    configure(&feature, "Inbox", "30");

    // Pretend 31 days have passed since the notes were written.
    let outcome = feature.run_now(SystemTime::now() + days(31)).unwrap();

    assert_eq!(outcome.removed.len(), 2);
    assert!(outcome.failed.is_empty());
    let trash = dir.path().join(".trash");
    assert!(trash.join("Inbox/Scratch/a.md").exists());
    assert!(trash.join("Inbox/b.md").exists());
    assert!(dir.path().join("Inbox/keep.txt").exists());
    assert!(dir.path().join("Elsewhere/c.md").exists());
    assert_eq!(
        *feature.host().notifications.borrow(),
        vec!["Removed 2 expired notes".to_string()]
    );
}

#[test]
fn test_permanent_delete_skips_trash() {
    let dir = TempDir::new().unwrap();
    write_note(&dir, "Inbox/a.md");

    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    configure(&feature, "Inbox", "1");
    feature
        .set_permanent_delete(true, SystemTime::now())
        .unwrap();

    feature.run_now(SystemTime::now() + days(2)).unwrap();

    assert!(!dir.path().join("Inbox/a.md").exists());
    assert!(!dir.path().join(".trash").exists());
}

#[test]
fn test_fresh_notes_are_kept_and_counted_as_expiring() {
    let dir = TempDir::new().unwrap();
    write_note(&dir, "Inbox/a.md");

    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    configure(&feature, "Inbox", "30");

    let outcome = feature.on_ready(SystemTime::now() + days(28)).unwrap();

    assert_eq!(outcome.expired(), 0);
    assert!(dir.path().join("Inbox/a.md").exists());
    assert_eq!(
        feature.host().status.borrow().as_deref(),
        Some("1 note expiring soon")
    );
}

#[test]
fn test_missing_target_folder_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    write_note(&dir, "Inbox/a.md");

    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    configure(&feature, "Nowhere", "1");

    let outcome = feature.run_now(SystemTime::now() + days(10)).unwrap();

    assert_eq!(outcome.expired(), 0);
    assert!(dir.path().join("Inbox/a.md").exists());
    assert!(feature.host().notifications.borrow().is_empty());
}

#[test]
fn test_damaged_settings_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join(".lapse/settings.toml");
    std::fs::create_dir_all(settings_path.parent().unwrap()).unwrap();
    std::fs::write(&settings_path, "target_folder = \"Inb").unwrap();

    let feature = NoteExpiry::load(create_host(&dir)).unwrap();
    assert_eq!(feature.settings(), Settings::default());

    feature
        .set_target_folder("Inbox", SystemTime::now())
        .unwrap();

    let reloaded = NoteExpiry::load(create_host(&dir)).unwrap();
    assert_eq!(reloaded.settings().target_folder, "Inbox");
}
