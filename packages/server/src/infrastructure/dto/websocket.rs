//! WebSocket event DTOs.
//!
//! One JSON object per frame:
//!
//! ```json
//! {"type":"MESSAGE","payload":{"username":"alice","text":"hi"},"timestamp":"12:34:56"}
//! ```

use serde::{Deserialize, Serialize};

/// Envelope of every channel event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDto {
    pub r#type: String,
    /// Absent or `null` payloads decode as empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_data: Option<serde_json::Value>,
}
