//! Chat event model.
//!
//! Every frame exchanged over the channel is a [`ChatEvent`]: a type tag, a
//! payload whose populated fields depend on the type, and an optional
//! `HH:MM:SS` timestamp set by the server when it broadcasts. Inbound frames
//! are classified once into an [`InboundEvent`] and never re-inspected by tag.

use serde_json::Value;

use super::value_object::Username;

/// Event type tag carried in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Join,
    Message,
    Typing,
    StopTyping,
    WhiteboardDraw,
    WhiteboardClear,
    System,
    Error,
    UserListUpdate,
    FileUpload,
    VoiceMessage,
}

impl EventType {
    pub const ALL: [EventType; 11] = [
        EventType::Join,
        EventType::Message,
        EventType::Typing,
        EventType::StopTyping,
        EventType::WhiteboardDraw,
        EventType::WhiteboardClear,
        EventType::System,
        EventType::Error,
        EventType::UserListUpdate,
        EventType::FileUpload,
        EventType::VoiceMessage,
    ];

    /// Wire representation of the tag
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventType::Join => "JOIN",
            EventType::Message => "MESSAGE",
            EventType::Typing => "TYPING",
            EventType::StopTyping => "STOP_TYPING",
            EventType::WhiteboardDraw => "WHITEBOARD_DRAW",
            EventType::WhiteboardClear => "WHITEBOARD_CLEAR",
            EventType::System => "SYSTEM",
            EventType::Error => "ERROR",
            EventType::UserListUpdate => "USER_LIST_UPDATE",
            EventType::FileUpload => "FILE_UPLOAD",
            EventType::VoiceMessage => "VOICE_MESSAGE",
        }
    }

    /// Parse a wire tag; tags are case-sensitive
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Whether broadcasts of this type are kept in the history buffer
    pub const fn is_recordable(&self) -> bool {
        matches!(
            self,
            EventType::Message | EventType::System | EventType::FileUpload | EventType::VoiceMessage
        )
    }
}

/// Event payload. Any subset of fields may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    pub username: Option<String>,
    pub text: Option<String>,
    pub users: Option<Vec<String>>,
    pub filename: Option<String>,
    pub filesize: Option<String>,
    pub url: Option<String>,
    pub duration: Option<String>,
    /// Whiteboard stroke data, passed through without interpretation
    pub draw_data: Option<Value>,
}

/// Announcement of a stored upload
#[derive(Debug, Clone, PartialEq)]
pub struct SharedFile {
    pub username: Username,
    pub filename: String,
    pub filesize: String,
    pub url: String,
}

/// One typed chat event
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    pub event_type: EventType,
    pub payload: Payload,
    pub timestamp: Option<String>,
}

impl ChatEvent {
    pub fn new(event_type: EventType, payload: Payload) -> Self {
        Self {
            event_type,
            payload,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: String) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn message(username: &Username, text: String, timestamp: String) -> Self {
        Self::new(
            EventType::Message,
            Payload {
                username: Some(username.as_str().to_string()),
                text: Some(text),
                ..Payload::default()
            },
        )
        .with_timestamp(timestamp)
    }

    pub fn system(text: String, timestamp: String) -> Self {
        Self::new(
            EventType::System,
            Payload {
                text: Some(text),
                ..Payload::default()
            },
        )
        .with_timestamp(timestamp)
    }

    pub fn error(text: String) -> Self {
        Self::new(
            EventType::Error,
            Payload {
                text: Some(text),
                ..Payload::default()
            },
        )
    }

    pub fn typing(username: &Username) -> Self {
        Self::new(EventType::Typing, Payload::for_user(username))
    }

    pub fn stop_typing(username: &Username) -> Self {
        Self::new(EventType::StopTyping, Payload::for_user(username))
    }

    pub fn user_list(users: &[Username]) -> Self {
        Self::new(
            EventType::UserListUpdate,
            Payload {
                users: Some(users.iter().map(|u| u.as_str().to_string()).collect()),
                ..Payload::default()
            },
        )
    }

    pub fn file_upload(file: SharedFile, timestamp: String) -> Self {
        Self::new(EventType::FileUpload, Payload::for_file(file)).with_timestamp(timestamp)
    }

    pub fn voice_message(file: SharedFile, duration: String, timestamp: String) -> Self {
        let mut payload = Payload::for_file(file);
        payload.duration = Some(duration);
        Self::new(EventType::VoiceMessage, payload).with_timestamp(timestamp)
    }

    pub fn is_recordable(&self) -> bool {
        self.event_type.is_recordable()
    }
}

impl Payload {
    fn for_user(username: &Username) -> Self {
        Self {
            username: Some(username.as_str().to_string()),
            ..Self::default()
        }
    }

    fn for_file(file: SharedFile) -> Self {
        Self {
            username: Some(file.username.into_string()),
            filename: Some(file.filename),
            filesize: Some(file.filesize),
            url: Some(file.url),
            ..Self::default()
        }
    }
}

/// An inbound frame after classification.
///
/// Server-originated tags (`SYSTEM`, `ERROR`, ...) sent by a client land in
/// `Unknown` together with tags the server has never heard of.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Join { username: Option<String> },
    Message { text: Option<String> },
    Typing,
    StopTyping,
    WhiteboardDraw(ChatEvent),
    WhiteboardClear(ChatEvent),
    Unknown(String),
}

impl InboundEvent {
    /// Classify a raw tag plus its decoded payload
    pub fn classify(tag: &str, payload: Payload, timestamp: Option<String>) -> Self {
        let Some(event_type) = EventType::parse(tag) else {
            return InboundEvent::Unknown(tag.to_string());
        };

        match event_type {
            EventType::Join => InboundEvent::Join {
                username: payload.username,
            },
            EventType::Message => InboundEvent::Message { text: payload.text },
            EventType::Typing => InboundEvent::Typing,
            EventType::StopTyping => InboundEvent::StopTyping,
            EventType::WhiteboardDraw | EventType::WhiteboardClear => {
                let event = ChatEvent {
                    event_type,
                    payload,
                    timestamp,
                };
                if event_type == EventType::WhiteboardDraw {
                    InboundEvent::WhiteboardDraw(event)
                } else {
                    InboundEvent::WhiteboardClear(event)
                }
            }
            _ => InboundEvent::Unknown(tag.to_string()),
        }
    }
}
