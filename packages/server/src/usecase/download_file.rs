//! UseCase: ファイルのダウンロード
//!
//! 保存名の形式チェックと保存ディレクトリ内への閉じ込めは、ファイルシステムに
//! 触れる前に行われます。

use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::domain::{FileStorage, StorageName, UploadRecordRepository};

use super::error::DownloadError;

/// An opened download, ready to be streamed
pub struct DownloadedFile {
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    pub len: u64,
    /// Name shown to the user: the original upload name, or the storage name
    /// when no upload record exists
    pub original_name: String,
    pub content_type: String,
}

impl std::fmt::Debug for DownloadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadedFile")
            .field("len", &self.len)
            .field("original_name", &self.original_name)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// ダウンロードのユースケース
pub struct DownloadFileUseCase {
    storage: Arc<dyn FileStorage>,
    records: Arc<dyn UploadRecordRepository>,
}

impl DownloadFileUseCase {
    pub fn new(storage: Arc<dyn FileStorage>, records: Arc<dyn UploadRecordRepository>) -> Self {
        Self { storage, records }
    }

    pub async fn execute(&self, requested: String) -> Result<DownloadedFile, DownloadError> {
        let name = StorageName::new(requested).map_err(|e| {
            tracing::warn!("Rejected download request: {}", e);
            DownloadError::from(e)
        })?;

        let stored = self.storage.open(&name).await.map_err(|e| {
            tracing::warn!("Download of '{}' failed: {}", name, e);
            DownloadError::from(e)
        })?;

        let original_name = self
            .records
            .original_name(&name)
            .await
            .unwrap_or_else(|| name.to_string());
        let content_type = mime_guess::from_path(name.as_str())
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(DownloadedFile {
            reader: stored.reader,
            len: stored.len,
            original_name,
            content_type,
        })
    }
}
