use crate::host::error::{PersistenceError, VaultError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("Settings persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("A cleanup run is already in progress")]
    RunInProgress,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
