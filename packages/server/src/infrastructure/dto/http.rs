//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub server: String,
    pub status: String,
    pub port: u16,
    pub connected_users: usize,
    pub message_history: usize,
    pub ssl_enabled: bool,
}

/// `GET /stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub connected_users: usize,
    pub message_history_size: usize,
    /// Milliseconds since the server started
    pub uptime: u64,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

/// Successful `POST /upload` and `POST /upload-voice`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub message: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
