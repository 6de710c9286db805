use crate::types::note::DeleteMode;
use nutype::nutype;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

pub const DEFAULT_EXPIRY_DAYS: u32 = 30;

const TARGET_FOLDER_KEY: &str = "target_folder";
const EXPIRY_DAYS_KEY: &str = "expiry_days";
const PERMANENT_DELETE_KEY: &str = "permanent_delete";

/// Number of days after creation at which a note expires. Always positive.
#[nutype(
    validate(greater = 0),
    default = DEFAULT_EXPIRY_DAYS,
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Default,
        Display,
        TryFrom,
        Into,
        Serialize,
        Deserialize,
    )
)]
pub struct ExpiryDays(u32);

impl ExpiryDays {
    /// Parses user input such as `"14"`. Returns `None` for anything that is
    /// not a positive integer.
    pub fn parse(input: &str) -> Option<Self> {
        let days = input.trim().parse::<u32>().ok()?;
        Self::try_new(days).ok()
    }
}

/// Feature settings, persisted by the host as a flat TOML table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Vault-relative folder to clean. Empty disables cleanup.
    pub target_folder: String,
    pub expiry_days: ExpiryDays,
    /// `true` removes notes irreversibly, `false` moves them to the trash.
    pub permanent_delete: bool,
}

impl Settings {
    /// Builds settings from a persisted table, key by key on top of the
    /// defaults. Missing keys keep their default; malformed ones are logged
    /// and ignored.
    pub fn from_table(table: &Table) -> Self {
        let mut settings = Self::default();

        if let Some(folder) = read_key::<String>(table, TARGET_FOLDER_KEY) {
            settings.set_target_folder(&folder);
        }
        if let Some(days) = read_key::<ExpiryDays>(table, EXPIRY_DAYS_KEY) {
            settings.expiry_days = days;
        }
        if let Some(permanent) = read_key::<bool>(table, PERMANENT_DELETE_KEY) {
            settings.permanent_delete = permanent;
        }

        settings
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.insert(
            TARGET_FOLDER_KEY.to_string(),
            Value::String(self.target_folder.clone()),
        );
        table.insert(
            EXPIRY_DAYS_KEY.to_string(),
            Value::Integer(i64::from(self.expiry_days.into_inner())),
        );
        table.insert(
            PERMANENT_DELETE_KEY.to_string(),
            Value::Boolean(self.permanent_delete),
        );
        table
    }

    pub fn delete_mode(&self) -> DeleteMode {
        DeleteMode::from_permanent(self.permanent_delete)
    }
}

/// Edits coming from the settings panel.
impl Settings {
    pub fn set_target_folder(&mut self, input: &str) {
        self.target_folder = input.trim().to_string();
    }

    /// Applies an expiry edit. Returns `false` and keeps the previous value
    /// when the input is not a positive integer.
    pub fn set_expiry_days(&mut self, input: &str) -> bool {
        match ExpiryDays::parse(input) {
            Some(days) => {
                self.expiry_days = days;
                true
            }
            None => false,
        }
    }

    pub fn set_permanent_delete(&mut self, permanent: bool) {
        self.permanent_delete = permanent;
    }
}

fn read_key<T: DeserializeOwned>(table: &Table, key: &str) -> Option<T> {
    let value = table.get(key)?;
    match value.clone().try_into::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring invalid persisted setting");
            None
        }
    }
}
