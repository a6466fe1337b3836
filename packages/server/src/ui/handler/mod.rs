//! Request handlers.

mod file;
mod http;
mod websocket;

pub use file::{download_file, upload_file, upload_voice};
pub use http::{stats, status};
pub use websocket::websocket_handler;
