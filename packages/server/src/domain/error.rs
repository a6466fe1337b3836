//! Domain error types.

use thiserror::Error;

/// Value object construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("message text cannot be empty")]
    EmptyMessageText,

    #[error("invalid storage name: '{0}'")]
    InvalidStorageName(String),
}

/// Connection registry failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// Message push failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Path guard failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("access denied: '{0}' resolves outside the storage root")]
    PathDenied(String),
}

/// File storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("file exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("file '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
