//! UseCase: チャット参加（JOIN）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - ユーザー名の検証、重複チェック、履歴の再送、参加通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者への履歴再送 → ユーザー一覧更新 → 参加メッセージの順で届く
//! - 異常系：空のユーザー名、使用中のユーザー名
//! - エッジケース：同時に同じユーザー名で参加（1 件のみ成功）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry, Username};

use super::{broadcast::BroadcastUseCase, error::ChatError};

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    broadcast: Arc<BroadcastUseCase>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
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

    /// 参加を実行
    ///
    /// 1. ユーザー名を登録（空・使用中なら失敗）
    /// 2. 履歴をこの接続にだけ再送
    /// 3. ユーザー一覧を全員にブロードキャスト
    /// 4. 参加メッセージを全員にブロードキャストし、履歴に記録
    pub async fn execute(
        &self,
        connection: ConnectionId,
        username: Option<String>,
    ) -> Result<Username, ChatError> {
        let username = Username::new(username.unwrap_or_default())
            .map_err(|_| ChatError::EmptyUsername)?;

        self.registry.claim(connection, username.clone()).await?;
        tracing::info!(
            "{} joined the chat (Total users: {})",
            username,
            self.registry.count().await
        );

        self.broadcast.replay_history(&connection).await;

        let users = self.registry.snapshot_usernames().await;
        self.broadcast
            .broadcast(&ChatEvent::user_list(&users), None)
            .await?;

        let joined = ChatEvent::system(
            format!("{} joined the chat", username),
            self.clock.clock_time(),
        );
        self.broadcast.broadcast_and_record(joined, None).await?;

        Ok(username)
    }
}
