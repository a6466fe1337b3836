//! Filename sanitization and storage-root containment.
//!
//! Every filesystem access for uploads and downloads goes through these
//! functions first.

use std::path::{Component, Path, PathBuf};

use super::{error::GuardError, value_object::StorageName, value_object::is_storage_char};

/// Longest sanitized filename kept, in characters
pub const MAX_FILENAME_CHARS: usize = 100;

/// Name used for uploads without a client-supplied filename
pub const DEFAULT_UPLOAD_NAME: &str = "file";

/// Name used for voice uploads without a client-supplied filename
pub const DEFAULT_VOICE_NAME: &str = "voice-message.webm";

/// Audio extensions accepted for voice messages (compared case-insensitively)
pub const ALLOWED_AUDIO_EXTENSIONS: [&str; 6] = ["webm", "mp3", "ogg", "wav", "m4a", "aac"];

/// Reduce a client-supplied filename to a safe base name.
///
/// Directory components (either separator style) are dropped, every
/// character outside `[A-Za-z0-9._-]` becomes `_`, and the result is cut to
/// [`MAX_FILENAME_CHARS`]. A missing or empty name yields `default_name`.
pub fn sanitize_filename(original: Option<&str>, default_name: &str) -> String {
    let base = original
        .and_then(|name| name.rsplit(|c| c == '/' || c == '\\').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(default_name);

    base.chars()
        .map(|c| if is_storage_char(c) { c } else { '_' })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// Whether `name` ends in one of [`ALLOWED_AUDIO_EXTENSIONS`]
pub fn has_allowed_audio_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, extension)| {
            ALLOWED_AUDIO_EXTENSIONS
                .iter()
                .any(|allowed| extension.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Resolve `name` under `root`, rejecting anything that is not a strict
/// descendant of the root once `.` and `..` are folded away.
pub fn resolve_within(root: &Path, name: &StorageName) -> Result<PathBuf, GuardError> {
    let root = normalize_path(root);
    let candidate = normalize_path(&root.join(name.as_str()));

    if candidate != root && candidate.starts_with(&root) {
        Ok(candidate)
    } else {
        Err(GuardError::PathDenied(name.as_str().to_string()))
    }
}

/// Lexically fold `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
