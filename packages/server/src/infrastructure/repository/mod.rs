//! Repository implementations.

pub mod inmemory;

pub use inmemory::{
    InMemoryConnectionRegistry, InMemoryHistoryRepository, InMemoryUploadRecordRepository,
};
