//! Conversion logic between DTOs and domain events.

use crate::domain::{ChatEvent, InboundEvent, Payload};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::PayloadDto> for Payload {
    fn from(dto: dto::PayloadDto) -> Self {
        Self {
            username: dto.username,
            text: dto.text,
            users: dto.users,
            filename: dto.filename,
            filesize: dto.filesize,
            url: dto.url,
            duration: dto.duration,
            draw_data: dto.draw_data,
        }
    }
}

impl From<dto::EventDto> for InboundEvent {
    fn from(dto: dto::EventDto) -> Self {
        let payload = dto.payload.map(Payload::from).unwrap_or_default();
        InboundEvent::classify(&dto.r#type, payload, dto.timestamp)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Payload> for dto::PayloadDto {
    fn from(model: Payload) -> Self {
        Self {
            username: model.username,
            text: model.text,
            users: model.users,
            filename: model.filename,
            filesize: model.filesize,
            url: model.url,
            duration: model.duration,
            draw_data: model.draw_data,
        }
    }
}

impl From<ChatEvent> for dto::EventDto {
    fn from(model: ChatEvent) -> Self {
        Self {
            r#type: model.event_type.as_str().to_string(),
            payload: Some(model.payload.into()),
            timestamp: model.timestamp,
        }
    }
}

/// Decode one inbound text frame
pub fn decode_frame(text: &str) -> Result<InboundEvent, serde_json::Error> {
    let dto: dto::EventDto = serde_json::from_str(text)?;
    Ok(dto.into())
}

/// Encode an outbound event as one text frame
pub fn encode_event(event: &ChatEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::EventDto::from(event.clone()))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{EventType, SharedFile, Username};

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_decode_join() {
        // テスト項目: JOIN フレームからユーザー名が取り出される
        // given (前提条件):
        let frame = r#"{"type":"JOIN","payload":{"username":"alice"}}"#;

        // when (操作):
        let event = decode_frame(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            InboundEvent::Join {
                username: Some("alice".to_string())
            }
        );
    }

    #[test]
    fn test_decode_missing_or_null_payload() {
        // テスト項目: payload が無い・null のフレームも空 payload として扱う
        // when (操作):
        let missing = decode_frame(r#"{"type":"JOIN"}"#).unwrap();
        let null = decode_frame(r#"{"type":"MESSAGE","payload":null}"#).unwrap();

        // then (期待する結果):
        assert_eq!(missing, InboundEvent::Join { username: None });
        assert_eq!(null, InboundEvent::Message { text: None });
    }

    #[test]
    fn test_decode_unknown_and_server_only_types() {
        // テスト項目: 未知の種別とサーバー専用の種別は Unknown になる
        // when (操作):
        let unknown = decode_frame(r#"{"type":"DANCE","payload":{}}"#).unwrap();
        let server_only = decode_frame(r#"{"type":"SYSTEM","payload":{"text":"x"}}"#).unwrap();

        // then (期待する結果):
        assert_eq!(unknown, InboundEvent::Unknown("DANCE".to_string()));
        assert_eq!(server_only, InboundEvent::Unknown("SYSTEM".to_string()));
    }

    #[test]
    fn test_decode_malformed_frame_fails() {
        // テスト項目: JSON として不正、または type が無いフレームはエラー
        assert!(decode_frame("not json").is_err());
        assert!(decode_frame(r#"{"payload":{}}"#).is_err());
        assert!(decode_frame(r#"{"type":42}"#).is_err());
    }

    #[test]
    fn test_decode_whiteboard_keeps_draw_data() {
        // テスト項目: ホワイトボードの描画データは解釈されずに保持される
        // given (前提条件):
        let frame = r#"{"type":"WHITEBOARD_DRAW","payload":{"drawData":{"x":1,"y":[2,3]}}}"#;

        // when (操作):
        let event = decode_frame(frame).unwrap();

        // then (期待する結果):
        let InboundEvent::WhiteboardDraw(event) = event else {
            panic!("expected WhiteboardDraw, got {event:?}");
        };
        assert_eq!(event.event_type, EventType::WhiteboardDraw);
        assert_eq!(event.payload.draw_data, Some(json!({"x": 1, "y": [2, 3]})));
    }

    #[test]
    fn test_encode_message_event() {
        // テスト項目: MESSAGE イベントのワイヤ表現
        // given (前提条件):
        let event = ChatEvent::message(&username("alice"), "hi".to_string(), "12:34:56".to_string());

        // when (操作):
        let encoded = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "MESSAGE",
                "payload": {"username": "alice", "text": "hi"},
                "timestamp": "12:34:56"
            })
        );
    }

    #[test]
    fn test_encode_user_list_and_error_omit_timestamp() {
        // テスト項目: USER_LIST_UPDATE と ERROR には timestamp が付かない
        // when (操作):
        let list: Value = serde_json::from_str(
            &encode_event(&ChatEvent::user_list(&[username("alice"), username("bob")])).unwrap(),
        )
        .unwrap();
        let error: Value =
            serde_json::from_str(&encode_event(&ChatEvent::error("boom".to_string())).unwrap())
                .unwrap();

        // then (期待する結果):
        assert_eq!(
            list,
            json!({"type": "USER_LIST_UPDATE", "payload": {"users": ["alice", "bob"]}})
        );
        assert_eq!(error, json!({"type": "ERROR", "payload": {"text": "boom"}}));
    }

    #[test]
    fn test_encode_voice_message_uses_camel_case_fields() {
        // テスト項目: VOICE_MESSAGE のファイル情報と duration が出力される
        // given (前提条件):
        let file = SharedFile {
            username: username("alice"),
            filename: "memo.webm".to_string(),
            filesize: "1.00 KB".to_string(),
            url: "http://localhost:7070/download/1_1_voice_memo.webm".to_string(),
        };
        let event = ChatEvent::voice_message(file, "0:07".to_string(), "09:00:00".to_string());

        // when (操作):
        let value: Value = serde_json::from_str(&encode_event(&event).unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "VOICE_MESSAGE");
        assert_eq!(value["payload"]["filename"], "memo.webm");
        assert_eq!(value["payload"]["filesize"], "1.00 KB");
        assert_eq!(value["payload"]["duration"], "0:07");
        assert_eq!(value["timestamp"], "09:00:00");
    }
}
