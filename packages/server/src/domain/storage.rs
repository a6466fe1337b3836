//! File storage seam for uploads and downloads.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use tokio::io::AsyncRead;

use super::{StorageError, StorageName};

/// Upload size cap: 5 MiB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Incoming upload body
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, std::io::Error>>;

/// A stored file opened for reading
pub struct StoredFile {
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    pub len: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Absolute, normalized storage root
    fn root(&self) -> &Path;

    /// Stream `body` into a new file named `name`, returning the byte count.
    ///
    /// Fails with [`StorageError::TooLarge`] as soon as more than `limit`
    /// bytes have arrived; a failed store leaves no file behind.
    async fn store(
        &self,
        name: &StorageName,
        body: ByteStream<'_>,
        limit: u64,
    ) -> Result<u64, StorageError>;

    /// Open a stored file; directories and missing files are `NotFound`
    async fn open(&self, name: &StorageName) -> Result<StoredFile, StorageError>;

    async fn remove(&self, name: &StorageName) -> Result<(), StorageError>;
}
