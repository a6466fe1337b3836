//! Real-time group chat server.
//!
//! Clients join over a WebSocket channel, exchange typed events (chat text,
//! typing indicators, whiteboard strokes) and receive a bounded replay of
//! recent history on join. Files and voice messages are uploaded over HTTP,
//! streamed to disk under a size cap and announced through the same
//! broadcast path.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod app;
pub mod config;
