//! Value objects.
//!
//! Each type validates its invariant once at construction, so code holding
//! one never re-checks it.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Stable identity of one live WebSocket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A claimed chat username (never blank)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUsername);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chat message body (never blank)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessageText);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Server-generated name an upload is persisted under.
///
/// Only `[A-Za-z0-9._-]` is accepted, so a storage name can never carry a
/// path separator. `.` and `..` still pass this check; containment in the
/// storage root is enforced by [`crate::domain::file_guard::resolve_within`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageName(String);

impl StorageName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() || !value.chars().all(is_storage_char) {
            return Err(ValueObjectError::InvalidStorageName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Characters allowed in sanitized and storage filenames
pub(crate) fn is_storage_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_blank_values() {
        // テスト項目: 空白のみのユーザー名は拒否される
        // when (操作):
        let empty = Username::new(String::new());
        let blank = Username::new("   \t".to_string());

        // then (期待する結果):
        assert_eq!(empty, Err(ValueObjectError::EmptyUsername));
        assert_eq!(blank, Err(ValueObjectError::EmptyUsername));
    }

    #[test]
    fn test_username_keeps_value_as_given() {
        // テスト項目: 有効なユーザー名はそのまま保持される
        // when (操作):
        let username = Username::new(" alice ".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(username.as_str(), " alice ");
    }

    #[test]
    fn test_message_text_rejects_blank_values() {
        // テスト項目: 空白のみのメッセージ本文は拒否される
        // when (操作):
        let result = MessageText::new("\n ".to_string());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyMessageText));
    }

    #[test]
    fn test_storage_name_accepts_safe_characters() {
        // テスト項目: 許可された文字のみのストレージ名は受理される
        // when (操作):
        let name = StorageName::new("1700000000000_1_report-v2.pdf".to_string());

        // then (期待する結果):
        assert!(name.is_ok());
    }

    #[test]
    fn test_storage_name_rejects_separators_and_empty() {
        // テスト項目: パス区切りや空文字を含むストレージ名は拒否される
        // when (操作):
        let traversal = StorageName::new("../etc/passwd".to_string());
        let backslash = StorageName::new("..\\secret".to_string());
        let empty = StorageName::new(String::new());
        let space = StorageName::new("my file.txt".to_string());

        // then (期待する結果):
        assert!(traversal.is_err());
        assert!(backslash.is_err());
        assert!(empty.is_err());
        assert!(space.is_err());
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
