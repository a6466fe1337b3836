//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{GuardError, RegistryError, StorageError, ValueObjectError};

/// Failure of one inbound channel event.
///
/// `Display` is the exact text sent back to the client in an ERROR event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Please join the chat first")]
    NotJoined,

    #[error("Message text cannot be empty")]
    EmptyMessageText,

    #[error("Unknown message type: {0}")]
    UnknownType(String),

    #[error("Invalid message format")]
    InvalidFormat,

    #[error("Server error processing message")]
    Internal,
}

impl From<RegistryError> for ChatError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UsernameTaken(name) => Self::UsernameTaken(name),
        }
    }
}

impl From<BroadcastError> for ChatError {
    fn from(error: BroadcastError) -> Self {
        tracing::error!("Broadcast failed: {}", error);
        Self::Internal
    }
}

/// Broadcast engine failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("failed to serialize event: {0}")]
    Serialization(String),
}

/// Upload failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file uploaded!")]
    MissingFile,

    #[error("Username is required and cannot be empty.")]
    MissingUsername,

    #[error("Invalid audio format. Supported: webm, mp3, ogg, wav, m4a, aac")]
    UnsupportedAudioFormat,

    #[error("Invalid multipart form: {0}")]
    InvalidForm(String),

    #[error("File too large (max 5MB)")]
    TooLarge,

    #[error("File upload failed due to I/O error: {0}")]
    Io(String),

    #[error("Failed to serialize broadcast message: {0}")]
    Serialization(String),
}

impl From<StorageError> for UploadError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::TooLarge { .. } => Self::TooLarge,
            other => Self::Io(other.to_string()),
        }
    }
}

impl From<BroadcastError> for UploadError {
    fn from(error: BroadcastError) -> Self {
        match error {
            BroadcastError::Serialization(message) => Self::Serialization(message),
        }
    }
}

/// Download failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Invalid filename")]
    InvalidName,

    #[error("Access denied: invalid file path")]
    PathDenied,

    #[error("File not found")]
    NotFound,

    #[error("Error while sending file: {0}")]
    Io(String),
}

impl From<ValueObjectError> for DownloadError {
    fn from(_: ValueObjectError) -> Self {
        Self::InvalidName
    }
}

impl From<StorageError> for DownloadError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Guard(GuardError::PathDenied(_)) => Self::PathDenied,
            StorageError::NotFound(_) => Self::NotFound,
            other => Self::Io(other.to_string()),
        }
    }
}
