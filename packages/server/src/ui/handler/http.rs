//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::get_unix_millis;

use crate::{
    infrastructure::dto::http::{StatsDto, StatusDto},
    ui::state::AppState,
};

const SERVER_NAME: &str = "Chat Server";
const SERVER_STATUS: &str = "Running OK";

/// `GET /status`
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let stats = state.get_server_stats_usecase.execute().await;

    Json(StatusDto {
        server: SERVER_NAME.to_string(),
        status: SERVER_STATUS.to_string(),
        port: state.settings.port,
        connected_users: stats.connected_users,
        message_history: stats.history_size,
        ssl_enabled: state.settings.ssl_enabled,
    })
}

/// `GET /stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.get_server_stats_usecase.execute().await;

    Json(StatsDto {
        connected_users: stats.connected_users,
        message_history_size: stats.history_size,
        uptime: stats.uptime_millis,
        timestamp: get_unix_millis(),
    })
}
