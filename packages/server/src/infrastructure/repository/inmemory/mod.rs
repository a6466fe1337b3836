//! インメモリ Repository 実装
//!
//! 状態はプロセスの生存期間中のみ保持され、再起動で失われます。

pub mod connection;
pub mod history;
pub mod upload_record;

pub use connection::InMemoryConnectionRegistry;
pub use history::InMemoryHistoryRepository;
pub use upload_record::InMemoryUploadRecordRepository;
