//! Local-disk FileStorage.
//!
//! Uploads are streamed through an 8 KiB buffered writer and counted chunk
//! by chunk, so an oversized body is rejected before it is fully written.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::{
    fs::{self, OpenOptions},
    io::{AsyncWrite, AsyncWriteExt, BufWriter},
};

use crate::domain::{
    ByteStream, FileStorage, StorageError, StorageName, StoredFile, file_guard::resolve_within,
};

const WRITE_BUFFER_BYTES: usize = 8 * 1024;

pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Open (creating if needed) the storage directory at `root`.
    ///
    /// The root is canonicalized once here; every later path check is
    /// relative to this absolute path.
    pub async fn open_root(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        fs::create_dir_all(root).await?;
        let root = fs::canonicalize(root).await?;
        tracing::info!("Upload directory: {}", root.display());
        Ok(Self { root })
    }
}

async fn copy_limited<W>(
    mut body: ByteStream<'_>,
    writer: &mut W,
    limit: u64,
) -> Result<u64, StorageError>
where
    W: AsyncWrite + Unpin,
{
    let mut total: u64 = 0;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        total += chunk.len() as u64;
        if total > limit {
            return Err(StorageError::TooLarge { limit });
        }
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;
    Ok(total)
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn store(
        &self,
        name: &StorageName,
        body: ByteStream<'_>,
        limit: u64,
    ) -> Result<u64, StorageError> {
        let path = resolve_within(&self.root, name)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);

        let result = copy_limited(body, &mut writer, limit).await;
        drop(writer);

        match result {
            Ok(written) => {
                tracing::debug!("Stored '{}' ({} bytes)", name, written);
                Ok(written)
            }
            Err(e) => {
                if let Err(remove_error) = fs::remove_file(&path).await {
                    tracing::warn!(
                        "Failed to remove partial upload '{}': {}",
                        path.display(),
                        remove_error
                    );
                }
                Err(e)
            }
        }
    }

    async fn open(&self, name: &StorageName) -> Result<StoredFile, StorageError> {
        let path = resolve_within(&self.root, name)?;

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Err(StorageError::NotFound(name.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let file = fs::File::open(&path).await?;
        Ok(StoredFile {
            reader: Box::new(file),
            len: metadata.len(),
        })
    }

    async fn remove(&self, name: &StorageName) -> Result<(), StorageError> {
        let path = resolve_within(&self.root, name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
