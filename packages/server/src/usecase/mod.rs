//! UseCase 層
//!
//! 1 つの操作につき 1 つのユースケースを置き、ドメインの trait を通じて
//! Repository・MessagePusher・FileStorage を操作します。

pub mod broadcast;
pub mod connect_client;
pub mod disconnect_client;
pub mod download_file;
pub mod error;
pub mod get_server_stats;
pub mod join_chat;
pub mod route_event;
pub mod send_message;
pub mod typing;
pub mod upload_file;
pub mod whiteboard;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::BroadcastUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use download_file::{DownloadFileUseCase, DownloadedFile};
pub use error::{BroadcastError, ChatError, DownloadError, UploadError};
pub use get_server_stats::{GetServerStatsUseCase, ServerStats};
pub use join_chat::JoinChatUseCase;
pub use route_event::RouteEventUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
pub use upload_file::{StoredUpload, UploadFileUseCase, UploadKind, UploadReceipt};
pub use whiteboard::WhiteboardUseCase;
