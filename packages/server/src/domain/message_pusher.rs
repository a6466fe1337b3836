//! MessagePusher trait 定義
//!
//! 接続中のクライアントへメッセージを届けるためのインターフェース。
//! WebSocket の具体的な実装は Infrastructure 層にあります。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound queue of one connection; the connection's writer task drains it
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery of serialized events to live connections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound queue of a newly opened connection
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    async fn unregister_client(&self, connection: &ConnectionId);

    /// Send to exactly one connection
    async fn push_to(
        &self,
        connection: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Best-effort fan-out to `targets`; returns how many deliveries succeeded.
    /// A failed delivery is logged and never stops the remaining ones.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize;
}
