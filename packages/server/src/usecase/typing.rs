//! UseCase: 入力中表示（TYPING / STOP_TYPING）
//!
//! 入力中の状態はタイムアウトで消えることはありません。
//! STOP_TYPING を受け取るか、接続が切れたときにだけ消えます。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry};

use super::{broadcast::BroadcastUseCase, error::ChatError};

/// 入力中表示のユースケース
pub struct TypingUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcast: Arc<BroadcastUseCase>,
    clock: Arc<dyn Clock>,
}

impl TypingUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        broadcast: Arc<BroadcastUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            broadcast,
            clock,
        }
    }

    /// 入力開始を記録し、送信者以外に通知
    pub async fn start(&self, from: ConnectionId) -> Result<(), ChatError> {
        let username = self
            .registry
            .lookup(&from)
            .await
            .ok_or(ChatError::NotJoined)?;

        let at_millis = self.clock.now().timestamp_millis();
        self.registry.mark_typing(&from, at_millis).await;
        self.broadcast
            .broadcast(&ChatEvent::typing(&username), Some(&from))
            .await?;
        Ok(())
    }

    /// 入力終了を記録し、送信者以外に通知
    pub async fn stop(&self, from: ConnectionId) -> Result<(), ChatError> {
        let username = self
            .registry
            .lookup(&from)
            .await
            .ok_or(ChatError::NotJoined)?;

        self.registry.clear_typing(&from).await;
        self.broadcast
            .broadcast(&ChatEvent::stop_typing(&username), Some(&from))
            .await?;
        Ok(())
    }
}
