//! UseCase: ファイル・ボイスメッセージのアップロード
//!
//! アップロードは 2 段階で処理します。
//!
//! 1. `store`: ファイル名を無害化し、一意な保存名で本文をディスクへ書き込む
//! 2. `complete`: ユーザー名を確認し、保存名と元のファイル名の対応を記録して
//!    FILE_UPLOAD / VOICE_MESSAGE をブロードキャストする
//!
//! ユーザー名は [`UploadFileUseCase::validate_username`] で届いた時点で検証します。
//! マルチパートのフィールドは任意の順序で届くため、本文の保存後にユーザー名の
//! 不備が分かった場合は保存済みのファイルを削除します。

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use hiroba_shared::time::Clock;

use crate::domain::{
    ByteStream, ChatEvent, FileStorage, MAX_UPLOAD_BYTES, SharedFile, StorageName,
    UploadRecordRepository, Username,
    file_guard::{
        DEFAULT_UPLOAD_NAME, DEFAULT_VOICE_NAME, has_allowed_audio_extension, sanitize_filename,
    },
    file_size::readable_file_size,
};

use super::{broadcast::BroadcastUseCase, error::UploadError};

const DEFAULT_VOICE_DURATION: &str = "0:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    File,
    Voice,
}

impl UploadKind {
    fn default_name(self) -> &'static str {
        match self {
            UploadKind::File => DEFAULT_UPLOAD_NAME,
            UploadKind::Voice => DEFAULT_VOICE_NAME,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            UploadKind::File => "File uploaded successfully",
            UploadKind::Voice => "Voice message uploaded successfully",
        }
    }
}

/// A body that has been written to storage but not yet announced
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub kind: UploadKind,
    pub storage_name: StorageName,
    /// Client-supplied filename, or the default when none was sent
    pub original_name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub message: &'static str,
    pub filename: String,
}

/// アップロードのユースケース
pub struct UploadFileUseCase {
    storage: Arc<dyn FileStorage>,
    records: Arc<dyn UploadRecordRepository>,
    broadcast: Arc<BroadcastUseCase>,
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl UploadFileUseCase {
    pub fn new(
        storage: Arc<dyn FileStorage>,
        records: Arc<dyn UploadRecordRepository>,
        broadcast: Arc<BroadcastUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            records,
            broadcast,
            clock,
            sequence: AtomicU64::new(0),
        }
    }

    /// 未指定・空白のみのユーザー名を拒否する
    pub fn validate_username(username: Option<String>) -> Result<Username, UploadError> {
        username
            .and_then(|name| Username::new(name).ok())
            .ok_or(UploadError::MissingUsername)
    }

    /// 本文を一意な保存名で書き込む
    pub async fn store(
        &self,
        kind: UploadKind,
        original_name: Option<&str>,
        body: ByteStream<'_>,
    ) -> Result<StoredUpload, UploadError> {
        let original_name = original_name.filter(|name| !name.trim().is_empty());
        let safe_name = sanitize_filename(original_name, kind.default_name());

        if kind == UploadKind::Voice && !has_allowed_audio_extension(&safe_name) {
            return Err(UploadError::UnsupportedAudioFormat);
        }

        let storage_name = self.next_storage_name(kind, &safe_name)?;
        let size = self
            .storage
            .store(&storage_name, body, MAX_UPLOAD_BYTES)
            .await
            .map_err(|e| {
                tracing::warn!("Upload '{}' rejected: {}", storage_name, e);
                UploadError::from(e)
            })?;

        Ok(StoredUpload {
            kind,
            storage_name,
            original_name: original_name.unwrap_or(kind.default_name()).to_string(),
            size,
        })
    }

    /// ユーザー名を確認し、記録とブロードキャストを行う
    ///
    /// # Arguments
    ///
    /// * `upload` - `store` の結果（ファイルのフィールドが無ければ `None`）
    /// * `base_url` - ダウンロード URL の前半（例: `http://localhost:7070`）
    pub async fn complete(
        &self,
        upload: Option<StoredUpload>,
        username: Option<String>,
        duration: Option<String>,
        base_url: &str,
    ) -> Result<UploadReceipt, UploadError> {
        let Some(upload) = upload else {
            return Err(UploadError::MissingFile);
        };

        let username = match Self::validate_username(username) {
            Ok(username) => username,
            Err(e) => {
                self.discard(&upload).await;
                return Err(e);
            }
        };

        self.records
            .save(upload.storage_name.clone(), upload.original_name.clone())
            .await;
        tracing::info!(
            "{} uploaded by {}: {} ({} bytes)",
            match upload.kind {
                UploadKind::File => "File",
                UploadKind::Voice => "Voice message",
            },
            username,
            upload.original_name,
            upload.size
        );

        let file = SharedFile {
            username,
            filename: upload.original_name.clone(),
            filesize: readable_file_size(upload.size),
            url: format!(
                "{}/download/{}",
                base_url.trim_end_matches('/'),
                upload.storage_name
            ),
        };
        let timestamp = self.clock.clock_time();
        let event = match upload.kind {
            UploadKind::File => ChatEvent::file_upload(file, timestamp),
            UploadKind::Voice => ChatEvent::voice_message(
                file,
                duration.unwrap_or_else(|| DEFAULT_VOICE_DURATION.to_string()),
                timestamp,
            ),
        };
        self.broadcast.broadcast_and_record(event, None).await?;

        Ok(UploadReceipt {
            message: upload.kind.success_message(),
            filename: upload.original_name,
        })
    }

    /// 保存済みのファイルを削除（失敗はログのみ）
    pub async fn discard(&self, upload: &StoredUpload) {
        if let Err(e) = self.storage.remove(&upload.storage_name).await {
            tracing::error!("Failed to remove upload '{}': {}", upload.storage_name, e);
        }
    }

    /// `{millis}_{seq}_{name}`, with `voice_` before the name for voice uploads
    fn next_storage_name(
        &self,
        kind: UploadKind,
        safe_name: &str,
    ) -> Result<StorageName, UploadError> {
        let millis = self.clock.now().timestamp_millis();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let marker = match kind {
            UploadKind::File => "",
            UploadKind::Voice => "voice_",
        };

        StorageName::new(format!("{millis}_{sequence}_{marker}{safe_name}"))
            .map_err(|e| UploadError::Io(e.to_string()))
    }
}
