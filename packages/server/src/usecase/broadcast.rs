//! UseCase: ブロードキャストエンジン
//!
//! イベントを一度だけシリアライズし、参加済み接続のスナップショットに配信します。
//! 記録対象のイベントは配信前に履歴へ追加されます。

use std::sync::Arc;

use crate::{
    domain::{ChatEvent, ConnectionId, ConnectionRegistry, HistoryRepository, MessagePusher},
    infrastructure::dto::encode_event,
};

use super::error::BroadcastError;

/// ブロードキャストのユースケース
pub struct BroadcastUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            history,
            message_pusher,
        }
    }

    /// 参加済みの全接続（`exclude` を除く）にイベントを配信
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信に成功した接続数
    /// * `Err(BroadcastError)` - シリアライズ失敗（誰にも配信されない）
    pub async fn broadcast(
        &self,
        event: &ChatEvent,
        exclude: Option<&ConnectionId>,
    ) -> Result<usize, BroadcastError> {
        let json =
            encode_event(event).map_err(|e| BroadcastError::Serialization(e.to_string()))?;
        let targets = self.broadcast_targets(exclude).await;
        let delivered = self.message_pusher.broadcast(targets, &json).await;

        tracing::debug!(
            "Broadcast {} event to {} connection(s)",
            event.event_type.as_str(),
            delivered
        );
        Ok(delivered)
    }

    /// 履歴に記録してから配信
    pub async fn broadcast_and_record(
        &self,
        event: ChatEvent,
        exclude: Option<&ConnectionId>,
    ) -> Result<usize, BroadcastError> {
        self.history.record(event.clone()).await;
        self.broadcast(&event, exclude).await
    }

    /// 1 つの接続にだけ送信（送信失敗はログのみ）
    pub async fn send_to(
        &self,
        connection: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), BroadcastError> {
        let json =
            encode_event(event).map_err(|e| BroadcastError::Serialization(e.to_string()))?;
        if let Err(e) = self.message_pusher.push_to(connection, &json).await {
            tracing::warn!(
                "Failed to send {} event to connection '{}': {}",
                event.event_type.as_str(),
                connection,
                e
            );
        }
        Ok(())
    }

    /// 履歴を古い順に 1 つの接続へ再送
    ///
    /// # Returns
    ///
    /// 送信を試みたイベント数
    pub async fn replay_history(&self, connection: &ConnectionId) -> usize {
        let history = self.history.snapshot().await;
        let total = history.len();

        for event in &history {
            if let Err(e) = self.send_to(connection, event).await {
                tracing::error!("Skipping history entry: {}", e);
            }
        }

        total
    }

    /// 参加済みの接続のスナップショット（`exclude` を除く）
    async fn broadcast_targets(&self, exclude: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.registry
            .snapshot_connections()
            .await
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect()
    }
}
