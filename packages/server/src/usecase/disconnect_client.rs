//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 送信キューの登録解除、ユーザー名の解放、退出通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続が切断 → ユーザー一覧更新 → 退出メッセージ
//! - エッジケース：JOIN していない接続の切断では何も通知しない

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry, MessagePusher, Username};

use super::broadcast::BroadcastUseCase;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcast: Arc<BroadcastUseCase>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast: Arc<BroadcastUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            broadcast,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 参加済みだった場合は解放したユーザー名
    pub async fn execute(&self, connection: ConnectionId) -> Option<Username> {
        self.message_pusher.unregister_client(&connection).await;

        let Some(username) = self.registry.unclaim(&connection).await else {
            tracing::info!("Connection {} closed before joining", connection);
            return None;
        };
        tracing::info!(
            "{} left the chat (Remaining: {})",
            username,
            self.registry.count().await
        );

        let users = self.registry.snapshot_usernames().await;
        if let Err(e) = self
            .broadcast
            .broadcast(&ChatEvent::user_list(&users), None)
            .await
        {
            tracing::error!("Failed to broadcast user list after leave: {}", e);
        }

        let left = ChatEvent::system(
            format!("{} left the chat", username),
            self.clock.clock_time(),
        );
        if let Err(e) = self
            .broadcast
            .broadcast_and_record(left, Some(&connection))
            .await
        {
            tracing::error!("Failed to broadcast leave message: {}", e);
        }

        Some(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::HistoryRepository,
        usecase::test_support::{FIXED_CLOCK_TIME, TestHarness, drain},
    };

    fn create_usecase(harness: &TestHarness) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(
            harness.registry.clone(),
            harness.pusher.clone(),
            harness.broadcast.clone(),
            harness.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_disconnect_joined_user_notifies_others() {
        // テスト項目: 参加済みの接続が切断すると一覧更新と退出メッセージが届く
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (alice, _alice_rx) = harness.join("alice").await;
        let (_bob, mut bob_rx) = harness.join("bob").await;

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(removed.map(Username::into_string), Some("alice".to_string()));
        let received = drain(&mut bob_rx);
        assert_eq!(received.len(), 2);
        assert_eq!(received[0]["type"], "USER_LIST_UPDATE");
        assert_eq!(received[0]["payload"]["users"], serde_json::json!(["bob"]));
        assert_eq!(received[1]["type"], "SYSTEM");
        assert_eq!(received[1]["payload"]["text"], "alice left the chat");
        assert_eq!(received[1]["timestamp"], FIXED_CLOCK_TIME);
        assert_eq!(harness.history.count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_unjoined_connection_is_silent() {
        // テスト項目: JOIN していない接続の切断では誰にも通知されない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (lurker, _lurker_rx) = harness.connect().await;
        let (_bob, mut bob_rx) = harness.join("bob").await;

        // when (操作):
        let removed = usecase.execute(lurker).await;

        // then (期待する結果):
        assert_eq!(removed, None);
        assert!(drain(&mut bob_rx).is_empty());
        assert_eq!(harness.history.count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_releases_username_and_typing() {
        // テスト項目: 切断でユーザー名と入力中状態が解放される
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let (alice, _alice_rx) = harness.join("alice").await;
        harness.registry.mark_typing(&alice, 1).await;

        // when (操作):
        usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(harness.registry.typing_since(&alice).await, None);
        assert_eq!(harness.registry.count().await, 0);
        assert!(
            harness.pusher.push_to(&alice, "late").await.is_err(),
            "sender should be unregistered"
        );
    }
}
