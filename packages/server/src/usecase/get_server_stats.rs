//! UseCase: サーバー状態の取得（/status, /stats）

use std::{sync::Arc, time::Instant};

use crate::domain::{ConnectionRegistry, HistoryRepository};

/// Point-in-time counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    pub connected_users: usize,
    pub history_size: usize,
    pub uptime_millis: u64,
}

/// サーバー状態取得のユースケース
pub struct GetServerStatsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<dyn HistoryRepository>,
    started_at: Instant,
}

impl GetServerStatsUseCase {
    /// 稼働時間はこの時点から数える
    pub fn new(registry: Arc<dyn ConnectionRegistry>, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            registry,
            history,
            started_at: Instant::now(),
        }
    }

    pub async fn execute(&self) -> ServerStats {
        let uptime_millis = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        ServerStats {
            connected_users: self.registry.count().await,
            history_size: self.history.count().await,
            uptime_millis,
        }
    }
}
