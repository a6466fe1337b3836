//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の確認、本文の検証、履歴への追加、全員へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者自身を含む全参加者に届き、履歴に残る
//! - 異常系：未参加の接続からの送信、空の本文

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry, MessageText};

use super::{broadcast::BroadcastUseCase, error::ChatError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcast: Arc<BroadcastUseCase>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 配信・記録された MESSAGE イベント
    /// * `Err(ChatError)` - 未参加、または本文が空
    pub async fn execute(
        &self,
        from: ConnectionId,
        text: Option<String>,
    ) -> Result<ChatEvent, ChatError> {
        let username = self
            .registry
            .lookup(&from)
            .await
            .ok_or(ChatError::NotJoined)?;
        let text =
            MessageText::new(text.unwrap_or_default()).map_err(|_| ChatError::EmptyMessageText)?;

        let event = ChatEvent::message(&username, text.into_string(), self.clock.clock_time());
        self.broadcast
            .broadcast_and_record(event.clone(), None)
            .await?;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::HistoryRepository,
        usecase::test_support::{FIXED_CLOCK_TIME, TestHarness, drain},
    };

    fn create_usecase(harness: &TestHarness) -> SendMessageUseCase {
        SendMessageUseCase::new(
            harness.registry.clone(),
            harness.broadcast.clone(),
            harness.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_send_message_success() {
        // テスト項目: 送信者を含む全参加者に届き、履歴に追加される
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (alice, mut alice_rx) = harness.join("alice").await;
        let (_bob, mut bob_rx) = harness.join("bob").await;

        // when (操作):
        let result = usecase.execute(alice, Some("Hello!".to_string())).await;

        // then (期待する結果):
        let event = result.unwrap();
        assert_eq!(event.payload.username.as_deref(), Some("alice"));
        assert_eq!(event.timestamp.as_deref(), Some(FIXED_CLOCK_TIME));

        for rx in [&mut alice_rx, &mut bob_rx] {
            let received = drain(rx);
            assert_eq!(received.len(), 1);
            assert_eq!(received[0]["type"], "MESSAGE");
            assert_eq!(received[0]["payload"]["username"], "alice");
            assert_eq!(received[0]["payload"]["text"], "Hello!");
            assert_eq!(received[0]["timestamp"], FIXED_CLOCK_TIME);
        }
        assert_eq!(harness.history.snapshot().await, vec![event]);
    }

    #[tokio::test]
    async fn test_send_message_not_joined() {
        // テスト項目: 未参加の接続からは送信できない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (lurker, _rx) = harness.connect().await;
        let (_bob, mut bob_rx) = harness.join("bob").await;

        // when (操作):
        let result = usecase.execute(lurker, Some("Hello!".to_string())).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::NotJoined));
        assert!(drain(&mut bob_rx).is_empty());
        assert_eq!(harness.history.count().await, 0);
    }

    #[tokio::test]
    async fn test_send_message_blank_text() {
        // テスト項目: 本文が無い・空白のみのメッセージは配信されない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (alice, mut alice_rx) = harness.join("alice").await;

        // when (操作):
        let missing = usecase.execute(alice, None).await;
        let blank = usecase.execute(alice, Some(" \n\t".to_string())).await;

        // then (期待する結果):
        assert_eq!(missing, Err(ChatError::EmptyMessageText));
        assert_eq!(blank, Err(ChatError::EmptyMessageText));
        assert!(drain(&mut alice_rx).is_empty());
        assert_eq!(harness.history.count().await, 0);
    }
}
