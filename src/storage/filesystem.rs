//! File system helpers
//!
//! Thin wrappers over the directory primitives the operations share.

use std::fs;
use std::io;
use std::path::Path;

/// Create a directory tree with rwxr-xr-x permissions
#[cfg(unix)]
pub fn create_dir_tree(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(path)
}

/// Create a directory tree with the platform default permissions
#[cfg(not(unix))]
pub fn create_dir_tree(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Check whether a directory has no entries
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
