//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, DownloadFileUseCase, GetServerStatsUseCase,
    RouteEventUseCase, UploadFileUseCase,
};

/// Values reported by `/status` and used to build download URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub ssl_enabled: bool,
}

impl ServerSettings {
    pub fn scheme(&self) -> &'static str {
        if self.ssl_enabled { "https" } else { "http" }
    }

    /// `host:port` used when a request carries no `Host` header
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared application state
pub struct AppState {
    pub settings: ServerSettings,
    /// ConnectClientUseCase（接続受付のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// RouteEventUseCase（受信イベント振り分けのユースケース）
    pub route_event_usecase: Arc<RouteEventUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// UploadFileUseCase（アップロードのユースケース）
    pub upload_file_usecase: Arc<UploadFileUseCase>,
    /// DownloadFileUseCase（ダウンロードのユースケース）
    pub download_file_usecase: Arc<DownloadFileUseCase>,
    /// GetServerStatsUseCase（サーバー状態取得のユースケース）
    pub get_server_stats_usecase: Arc<GetServerStatsUseCase>,
}
