//! UseCase: ホワイトボード中継
//!
//! 描画データは解釈せずにそのまま中継します。描画（DRAW）は送信者以外へ、
//! 消去（CLEAR）は送信者を含む全員へ届きます。どちらも履歴には残りません。

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry};

use super::{broadcast::BroadcastUseCase, error::ChatError};

/// ホワイトボード中継のユースケース
pub struct WhiteboardUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcast: Arc<BroadcastUseCase>,
}

impl WhiteboardUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, broadcast: Arc<BroadcastUseCase>) -> Self {
        Self {
            registry,
            broadcast,
        }
    }

    pub async fn draw(&self, from: ConnectionId, event: ChatEvent) -> Result<(), ChatError> {
        self.ensure_joined(&from).await?;
        self.broadcast.broadcast(&event, Some(&from)).await?;
        Ok(())
    }

    pub async fn clear(&self, from: ConnectionId, event: ChatEvent) -> Result<(), ChatError> {
        self.ensure_joined(&from).await?;
        self.broadcast.broadcast(&event, None).await?;
        Ok(())
    }

    async fn ensure_joined(&self, connection: &ConnectionId) -> Result<(), ChatError> {
        match self.registry.lookup(connection).await {
            Some(_) => Ok(()),
            None => Err(ChatError::NotJoined),
        }
    }
}
