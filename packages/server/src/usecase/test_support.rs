//! Shared fixtures for use case tests.

use std::{collections::HashMap, sync::Arc};

use chrono::{Local, TimeZone};
use hiroba_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, ConnectionRegistry, MessagePusher, Username},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryHistoryRepository},
    },
};

use super::BroadcastUseCase;

/// Rendered form of [`fixed_clock`]
pub(crate) const FIXED_CLOCK_TIME: &str = "12:34:56";

pub(crate) fn fixed_clock() -> Arc<FixedClock> {
    let time = Local
        .with_ymd_and_hms(2024, 1, 15, 12, 34, 56)
        .single()
        .unwrap();
    Arc::new(FixedClock::new(time))
}

/// Real in-memory state wired the way the server wires it
pub(crate) struct TestHarness {
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub history: Arc<InMemoryHistoryRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub broadcast: Arc<BroadcastUseCase>,
    pub clock: Arc<FixedClock>,
}

impl TestHarness {
    pub fn new() -> Self {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let broadcast = Arc::new(BroadcastUseCase::new(
            registry.clone(),
            history.clone(),
            pusher.clone(),
        ));
        Self {
            registry,
            history,
            pusher,
            broadcast,
            clock: fixed_clock(),
        }
    }

    /// Open a connection without joining
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = ConnectionId::generate();
        self.pusher.register_client(connection, tx).await;
        (connection, rx)
    }

    /// Open a connection and claim `name` for it directly in the registry
    pub async fn join(&self, name: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection, rx) = self.connect().await;
        self.registry
            .claim(connection, Username::new(name.to_string()).unwrap())
            .await
            .unwrap();
        (connection, rx)
    }
}

/// Everything queued on `rx` so far, decoded as JSON
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut received = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        received.push(serde_json::from_str(&frame).unwrap());
    }
    received
}
