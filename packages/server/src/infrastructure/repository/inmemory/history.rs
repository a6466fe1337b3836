//! InMemory HistoryRepository 実装
//!
//! 履歴バッファは接続レジストリとは独立した Mutex で保護します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatEvent, HistoryBuffer, HistoryRepository};

pub struct InMemoryHistoryRepository {
    buffer: Mutex<HistoryBuffer>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::with_capacity(crate::domain::MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(HistoryBuffer::with_capacity(capacity)),
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn record(&self, event: ChatEvent) {
        let mut buffer = self.buffer.lock().await;
        if let Some(evicted) = buffer.push(event) {
            tracing::debug!(
                "History full, evicted oldest {} event",
                evicted.event_type.as_str()
            );
        }
    }

    async fn snapshot(&self) -> Vec<ChatEvent> {
        let buffer = self.buffer.lock().await;
        buffer.snapshot()
    }

    async fn count(&self) -> usize {
        let buffer = self.buffer.lock().await;
        buffer.len()
    }
}
