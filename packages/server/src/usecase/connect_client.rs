//! UseCase: 接続受付処理
//!
//! 接続した時点ではユーザー名を持たない状態です。送信キューだけを登録し、
//! ERROR の返信は受け取れるがブロードキャストは届かない状態になります。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しい接続 ID を払い出し、送信キューを登録
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionId::generate();
        self.message_pusher.register_client(connection, sender).await;
        tracing::info!("New connection: {}", connection);
        connection
    }
}
