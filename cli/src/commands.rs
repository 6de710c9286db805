use crate::host::ConsoleHost;
use anyhow::Context;
use clap::{ArgAction, Subcommand};
use lapse_core::NoteExpiry;
use lapse_core::controller::view::{DELETE_EXPIRED_NOTES, SettingValue};
use std::time::SystemTime;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete expired notes now.
    Run,
    /// Refresh and print the expiring-soon status.
    Status,
    /// List candidate notes with their expiry class, without deleting.
    List,
    /// Show the current settings.
    Settings,
    /// Change a setting.
    Set {
        #[command(subcommand)]
        field: SetField,
    },
}

#[derive(Subcommand, Debug)]
pub enum SetField {
    /// Folder to clean, relative to the vault root. Empty disables cleanup.
    Folder { path: String },
    /// Days after creation before a note expires.
    Days { value: String },
    /// Delete permanently instead of moving to the trash.
    Permanent {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

impl Command {
    pub fn run(self, feature: &NoteExpiry<ConsoleHost>, now: SystemTime) -> anyhow::Result<()> {
        match self {
            Command::Run => {
                let outcome = feature
                    .execute_command(DELETE_EXPIRED_NOTES, now)
                    .context("cleanup failed")?;
                if outcome.expired() == 0 {
                    println!("No expired notes");
                }
            }
            Command::Status => {
                if feature.refresh_status(now)? == 0 {
                    println!("No notes expiring soon");
                }
            }
            Command::List => {
                let mut notes = feature.preview(now)?;
                notes.sort_by(|a, b| a.note.path.cmp(&b.note.path));
                for classified in notes {
                    println!(
                        "{:<14} {}",
                        classified.class.to_string(),
                        classified.note.path.display()
                    );
                }
            }
            Command::Settings => {
                for field in feature.settings_view().fields {
                    let value = match field.value {
                        SettingValue::Text(text) => format!("{text:?}"),
                        SettingValue::Number(n) => n.to_string(),
                        SettingValue::Toggle(on) => on.to_string(),
                    };
                    println!("{:<18} {:<10} {}", field.key, value, field.description);
                }
            }
            Command::Set { field } => field.apply(feature, now)?,
        }
        Ok(())
    }
}

impl SetField {
    fn apply(self, feature: &NoteExpiry<ConsoleHost>, now: SystemTime) -> anyhow::Result<()> {
        match self {
            SetField::Folder { path } => feature.set_target_folder(&path, now)?,
            SetField::Days { value } => {
                if !feature.set_expiry_days(&value, now)? {
                    eprintln!("Ignored expiry days {value:?}: expected a positive integer");
                }
            }
            SetField::Permanent { enabled } => feature.set_permanent_delete(enabled, now)?,
        }
        Ok(())
    }
}
