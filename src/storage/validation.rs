//! Path validation
//!
//! Resolves caller-supplied relative paths against the storage root and
//! rejects anything that would escape it. Resolution is purely lexical;
//! no filesystem access happens here.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Lexically clean a path, collapsing `.` and `..` segments without
/// touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping at the filesystem root is a no-op, so leading
                // `..` segments cannot climb above `/`.
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve a relative path against the storage root.
///
/// The result is the cleaned absolute path, accepted only when it is the
/// cleaned root itself or a proper descendant of it. Containment is checked
/// component-wise, so a sibling directory whose name merely starts with the
/// root's name (`/storage2` against `/storage`) is rejected.
pub fn resolve_path(storage_root: &Path, relative: &str) -> Result<PathBuf, StorageError> {
    let resolved = normalize_path(&storage_root.join(relative));
    let root = normalize_path(storage_root);

    // Path::starts_with compares whole components, never raw bytes.
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(StorageError::PathTraversal(relative.to_string()))
    }
}

/// Render a resolved path relative to the storage root, for echoing back
/// to the caller
pub fn relative_display(storage_root: &Path, resolved: &Path) -> String {
    let root = normalize_path(storage_root);
    resolved
        .strip_prefix(&root)
        .unwrap_or(resolved)
        .to_string_lossy()
        .into_owned()
}
