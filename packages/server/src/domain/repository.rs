//! Repository trait 定義
//!
//! ドメイン層が必要とする共有状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatEvent, ConnectionId, RegistryError, StorageName, Username};

/// Live connections and the usernames they have claimed.
///
/// Implementations must make `claim` atomic: the duplicate check and the
/// insert happen under one critical section, so two concurrent joins with
/// the same name cannot both succeed.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Claim `username` for `connection`
    async fn claim(
        &self,
        connection: ConnectionId,
        username: Username,
    ) -> Result<(), RegistryError>;

    /// Drop the connection and its typing entry, returning the username it held
    async fn unclaim(&self, connection: &ConnectionId) -> Option<Username>;

    /// Username claimed by the connection, if it has joined
    async fn lookup(&self, connection: &ConnectionId) -> Option<Username>;

    /// Point-in-time list of claimed usernames, sorted
    async fn snapshot_usernames(&self) -> Vec<Username>;

    /// Point-in-time list of joined connections
    async fn snapshot_connections(&self) -> Vec<ConnectionId>;

    /// Upsert the connection's last-typing timestamp (Unix milliseconds)
    async fn mark_typing(&self, connection: &ConnectionId, at_millis: i64);

    async fn clear_typing(&self, connection: &ConnectionId);

    /// Last-typing timestamp, if the connection is marked as typing
    async fn typing_since(&self, connection: &ConnectionId) -> Option<i64>;

    /// Number of joined connections
    async fn count(&self) -> usize;
}

/// Bounded history of recorded broadcasts
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append an event, evicting the oldest entry when full
    async fn record(&self, event: ChatEvent);

    /// Copy of the history, oldest first
    async fn snapshot(&self) -> Vec<ChatEvent>;

    async fn count(&self) -> usize;
}

/// Storage name → client-supplied original filename
#[async_trait]
pub trait UploadRecordRepository: Send + Sync {
    async fn save(&self, storage_name: StorageName, original_name: String);

    async fn original_name(&self, storage_name: &StorageName) -> Option<String>;
}
