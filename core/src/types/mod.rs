pub(crate) mod expiry;
pub use expiry::ExpiryClass;

pub(crate) mod note;
pub use note::{DeleteMode, NOTE_EXTENSION, NoteFile};

pub(crate) mod settings;
pub use settings::{DEFAULT_EXPIRY_DAYS, ExpiryDays, ExpiryDaysError, Settings};
