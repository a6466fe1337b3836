//! Dependency wiring.

use std::{collections::HashMap, sync::Arc};

use hiroba_shared::time::SystemClock;
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::StorageError,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryConnectionRegistry, InMemoryHistoryRepository, InMemoryUploadRecordRepository,
        },
        storage::LocalFileStorage,
    },
    ui::AppState,
    usecase::{
        BroadcastUseCase, ConnectClientUseCase, DisconnectClientUseCase, DownloadFileUseCase,
        GetServerStatsUseCase, JoinChatUseCase, RouteEventUseCase, SendMessageUseCase,
        TypingUseCase, UploadFileUseCase, WhiteboardUseCase,
    },
};

/// Build the application state for `config`.
///
/// Every call yields an isolated server: nothing is shared between two
/// states built here.
///
/// # Errors
///
/// Fails when the upload directory cannot be created or resolved.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StorageError> {
    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. FileStorage
    // 4. UseCases
    // 5. AppState

    // 1. Create Repositories (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let history = Arc::new(InMemoryHistoryRepository::new());
    let upload_records = Arc::new(InMemoryUploadRecordRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create FileStorage (local disk)
    let storage = Arc::new(LocalFileStorage::open_root(&config.upload_dir).await?);

    // 4. Create UseCases
    let clock = Arc::new(SystemClock);
    let broadcast = Arc::new(BroadcastUseCase::new(
        registry.clone(),
        history.clone(),
        message_pusher.clone(),
    ));
    let route_event_usecase = Arc::new(RouteEventUseCase::new(
        Arc::new(JoinChatUseCase::new(
            registry.clone(),
            broadcast.clone(),
            clock.clone(),
        )),
        Arc::new(SendMessageUseCase::new(
            registry.clone(),
            broadcast.clone(),
            clock.clone(),
        )),
        Arc::new(TypingUseCase::new(
            registry.clone(),
            broadcast.clone(),
            clock.clone(),
        )),
        Arc::new(WhiteboardUseCase::new(registry.clone(), broadcast.clone())),
        broadcast.clone(),
    ));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        broadcast.clone(),
        clock.clone(),
    ));
    let upload_file_usecase = Arc::new(UploadFileUseCase::new(
        storage.clone(),
        upload_records.clone(),
        broadcast.clone(),
        clock,
    ));
    let download_file_usecase = Arc::new(DownloadFileUseCase::new(storage, upload_records));
    let get_server_stats_usecase = Arc::new(GetServerStatsUseCase::new(registry, history));

    // 5. Create AppState
    Ok(AppState {
        settings: config.settings(),
        connect_client_usecase,
        route_event_usecase,
        disconnect_client_usecase,
        upload_file_usecase,
        download_file_usecase,
        get_server_stats_usecase,
    })
}
