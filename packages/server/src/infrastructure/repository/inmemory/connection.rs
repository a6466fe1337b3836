//! InMemory ConnectionRegistry 実装
//!
//! ユーザー名の対応表と入力中タイムスタンプを 1 つの Mutex で保護します。
//! `claim` の重複チェックと登録は同じクリティカルセクション内で行われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, RegistryError, Username};

#[derive(Default)]
struct RegistryState {
    usernames: HashMap<ConnectionId, Username>,
    typing: HashMap<ConnectionId, i64>,
}

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn claim(
        &self,
        connection: ConnectionId,
        username: Username,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        if state.usernames.values().any(|claimed| claimed == &username) {
            return Err(RegistryError::UsernameTaken(username.into_string()));
        }

        state.usernames.insert(connection, username);
        Ok(())
    }

    async fn unclaim(&self, connection: &ConnectionId) -> Option<Username> {
        let mut state = self.state.lock().await;
        state.typing.remove(connection);
        state.usernames.remove(connection)
    }

    async fn lookup(&self, connection: &ConnectionId) -> Option<Username> {
        let state = self.state.lock().await;
        state.usernames.get(connection).cloned()
    }

    async fn snapshot_usernames(&self) -> Vec<Username> {
        let mut usernames: Vec<Username> = {
            let state = self.state.lock().await;
            state.usernames.values().cloned().collect()
        };

        // Sort for consistent ordering
        usernames.sort();
        usernames
    }

    async fn snapshot_connections(&self) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.usernames.keys().copied().collect()
    }

    async fn mark_typing(&self, connection: &ConnectionId, at_millis: i64) {
        let mut state = self.state.lock().await;
        state.typing.insert(*connection, at_millis);
    }

    async fn clear_typing(&self, connection: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.typing.remove(connection);
    }

    async fn typing_since(&self, connection: &ConnectionId) -> Option<i64> {
        let state = self.state.lock().await;
        state.typing.get(connection).copied()
    }

    async fn count(&self) -> usize {
        let state = self.state.lock().await;
        state.usernames.len()
    }
}
