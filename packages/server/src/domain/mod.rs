//! Domain layer: value objects, the chat event model and the seams the
//! use cases depend on.
//!
//! Nothing in this module touches the network or the filesystem directly;
//! concrete implementations of the traits live in `crate::infrastructure`.

pub mod error;
pub mod event;
pub mod file_guard;
pub mod file_size;
pub mod history;
pub mod message_pusher;
pub mod repository;
pub mod storage;
pub mod value_object;

pub use error::{GuardError, MessagePushError, RegistryError, StorageError, ValueObjectError};
pub use event::{ChatEvent, EventType, InboundEvent, Payload, SharedFile};
pub use history::{HistoryBuffer, MAX_HISTORY};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{ConnectionRegistry, HistoryRepository, UploadRecordRepository};
pub use storage::{ByteStream, FileStorage, MAX_UPLOAD_BYTES, StoredFile};
pub use value_object::{ConnectionId, MessageText, StorageName, Username};
