//! UseCase: 受信イベントの振り分け
//!
//! 1 フレームを解釈して対応するユースケースへ渡します。検証エラーも
//! 処理中のパニックも、送信者だけへの ERROR イベントに変換され、
//! 接続の処理はそのまま続きます。

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures_util::FutureExt;

use crate::{
    domain::{ChatEvent, ConnectionId, InboundEvent},
    infrastructure::dto::decode_frame,
};

use super::{
    broadcast::BroadcastUseCase, error::ChatError, join_chat::JoinChatUseCase,
    send_message::SendMessageUseCase, typing::TypingUseCase, whiteboard::WhiteboardUseCase,
};

/// 受信イベント振り分けのユースケース
pub struct RouteEventUseCase {
    join_chat: Arc<JoinChatUseCase>,
    send_message: Arc<SendMessageUseCase>,
    typing: Arc<TypingUseCase>,
    whiteboard: Arc<WhiteboardUseCase>,
    broadcast: Arc<BroadcastUseCase>,
}

impl RouteEventUseCase {
    pub fn new(
        join_chat: Arc<JoinChatUseCase>,
        send_message: Arc<SendMessageUseCase>,
        typing: Arc<TypingUseCase>,
        whiteboard: Arc<WhiteboardUseCase>,
        broadcast: Arc<BroadcastUseCase>,
    ) -> Self {
        Self {
            join_chat,
            send_message,
            typing,
            whiteboard,
            broadcast,
        }
    }

    /// 1 フレームを処理
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 処理成功
    /// * `Err(ChatError)` - 送信者に ERROR として返した内容
    pub async fn execute(&self, from: ConnectionId, frame: &str) -> Result<(), ChatError> {
        let error = match AssertUnwindSafe(self.dispatch(from, frame))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(error)) => {
                tracing::warn!("Rejected event from connection '{}': {}", from, error);
                error
            }
            Err(_) => {
                tracing::error!("Panic while handling event from connection '{}'", from);
                ChatError::Internal
            }
        };

        if let Err(e) = self
            .broadcast
            .send_to(&from, &ChatEvent::error(error.to_string()))
            .await
        {
            tracing::error!("Failed to send error to connection '{}': {}", from, e);
        }
        Err(error)
    }

    async fn dispatch(&self, from: ConnectionId, frame: &str) -> Result<(), ChatError> {
        let event = decode_frame(frame).map_err(|e| {
            tracing::debug!("Malformed frame from connection '{}': {}", from, e);
            ChatError::InvalidFormat
        })?;

        match event {
            InboundEvent::Join { username } => {
                self.join_chat.execute(from, username).await?;
            }
            InboundEvent::Message { text } => {
                self.send_message.execute(from, text).await?;
            }
            InboundEvent::Typing => self.typing.start(from).await?,
            InboundEvent::StopTyping => self.typing.stop(from).await?,
            InboundEvent::WhiteboardDraw(event) => self.whiteboard.draw(from, event).await?,
            InboundEvent::WhiteboardClear(event) => self.whiteboard.clear(from, event).await?,
            InboundEvent::Unknown(tag) => return Err(ChatError::UnknownType(tag)),
        }

        Ok(())
    }
}
