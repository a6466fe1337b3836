//! InMemory UploadRecordRepository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StorageName, UploadRecordRepository};

/// Storage name → original filename, kept for the process lifetime
#[derive(Default)]
pub struct InMemoryUploadRecordRepository {
    records: Mutex<HashMap<StorageName, String>>,
}

impl InMemoryUploadRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadRecordRepository for InMemoryUploadRecordRepository {
    async fn save(&self, storage_name: StorageName, original_name: String) {
        let mut records = self.records.lock().await;
        records.insert(storage_name, original_name);
    }

    async fn original_name(&self, storage_name: &StorageName) -> Option<String> {
        let records = self.records.lock().await;
        records.get(storage_name).cloned()
    }
}
