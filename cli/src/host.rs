use lapse_core::host::Host;
use lapse_core::host::local::{LocalVault, TomlSettingsFile};
use std::path::{Path, PathBuf};

/// Hosts the feature over a notes directory, printing notifications and the
/// status label to stdout.
pub struct ConsoleHost {
    vault: LocalVault,
    settings: TomlSettingsFile,
}

impl ConsoleHost {
    pub fn new(vault_root: &Path, settings_path: PathBuf) -> Self {
        Self {
            vault: LocalVault::new(vault_root),
            settings: TomlSettingsFile::new(settings_path),
        }
    }

    pub fn default_settings_path(vault_root: &Path) -> PathBuf {
        vault_root.join(".lapse").join("settings.toml")
    }
}

impl Host for ConsoleHost {
    type Vault = LocalVault;
    type Persistence = TomlSettingsFile;

    fn vault(&self) -> &LocalVault {
        &self.vault
    }

    fn persistence(&self) -> &TomlSettingsFile {
        &self.settings
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn set_status(&self, label: Option<&str>) {
        match label {
            Some(label) => println!("[{label}]"),
            None => tracing::debug!("Status label cleared"),
        }
    }
}
