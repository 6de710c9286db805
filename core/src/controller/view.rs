//! Descriptors the host uses to build its settings panel and command palette.

use crate::types::Settings;

/// Id of the command that runs cleanup on demand.
pub const DELETE_EXPIRED_NOTES: &str = "delete-expired-notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub id: &'static str,
    pub name: &'static str,
}

pub const COMMANDS: &[CommandDescriptor] = &[CommandDescriptor {
    id: DELETE_EXPIRED_NOTES,
    name: "Delete expired notes",
}];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Text(String),
    Number(u32),
    Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingField {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub value: SettingValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub fields: Vec<SettingField>,
}

impl SettingsView {
    pub fn new(settings: &Settings) -> Self {
        Self {
            fields: vec![
                SettingField {
                    key: "target_folder",
                    name: "Target folder",
                    description: "Folder whose notes are removed once expired. Leave empty to disable.",
                    value: SettingValue::Text(settings.target_folder.clone()),
                },
                SettingField {
                    key: "expiry_days",
                    name: "Expiry days",
                    description: "Days after creation before a note is removed.",
                    value: SettingValue::Number(settings.expiry_days.into_inner()),
                },
                SettingField {
                    key: "permanent_delete",
                    name: "Delete permanently",
                    description: "Remove notes irreversibly instead of moving them to the trash.",
                    value: SettingValue::Toggle(settings.permanent_delete),
                },
            ],
        }
    }

    pub fn field(&self, key: &str) -> Option<&SettingField> {
        self.fields.iter().find(|field| field.key == key)
    }
}
