//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信チャンネル（`UnboundedSender`）を管理
//! - 個別送信（push_to）とブロードキャスト（broadcast）
//!
//! ソケット自体は UI 層が所有し、ここでは送信キューへの投入だけを行います。
//! ブロードキャストは送信先チャンネルを複製してからロックを解放し、
//! その後に送信するため、遅いクライアントが他の処理を止めることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone());
///
/// pusher.push_to(&connection, r#"{"type":"ERROR","payload":{}}"#).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// Key: ConnectionId, Value: 送信キュー
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection);
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = {
            let clients = self.clients.lock().await;
            clients.get(connection).cloned()
        };

        match sender {
            Some(sender) => {
                sender
                    .send(content.to_string())
                    .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
                tracing::debug!("Pushed message to connection '{}'", connection);
                Ok(())
            }
            None => Err(MessagePushError::ClientNotFound(connection.to_string())),
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize {
        let senders: Vec<(ConnectionId, PusherChannel)> = {
            let clients = self.clients.lock().await;
            targets
                .into_iter()
                .filter_map(|target| match clients.get(&target) {
                    Some(sender) => Some((target, sender.clone())),
                    None => {
                        tracing::warn!(
                            "Connection '{}' not found during broadcast, skipping",
                            target
                        );
                        None
                    }
                })
                .collect()
        };

        let mut delivered = 0;
        for (target, sender) in senders {
            // ブロードキャストでは一部の送信失敗を許容
            match sender.send(content.to_string()) {
                Ok(()) => {
                    delivered += 1;
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                }
                Err(e) => {
                    tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                }
            }
        }

        delivered
    }
}
