//! Storage operations
//!
//! The filesystem mutations behind the operation services: streaming
//! writes, pre-download checks, renames, removals, and directory listing.
//! Callers pass paths that already went through `validation::resolve_path`.

use log::{error, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::StorageError;
use crate::storage::filesystem::{create_dir_tree, is_empty_dir};
use crate::storage::results::{DirEntryInfo, StoreResult};

const BUFFER_SIZE: usize = 8192;

/// Streams a file body to `dest`, creating missing parent directories.
///
/// The copy is not atomic: a mid-copy failure leaves the partial file in
/// place and the caller owns cleanup or retry.
pub fn store_file<R: Read>(source: &mut R, dest: &Path) -> Result<StoreResult, StorageError> {
    if let Some(parent) = dest.parent() {
        create_dir_tree(parent).map_err(|e| {
            error!("Failed to create directory {}: {}", parent.display(), e);
            StorageError::CreateDirFailed(parent.display().to_string(), e)
        })?;
    }

    let mut file = fs::File::create(dest).map_err(|e| {
        error!("Failed to create file {}: {}", dest.display(), e);
        StorageError::CreateFileFailed(dest.display().to_string(), e)
    })?;

    let mut buffer = [0u8; BUFFER_SIZE];
    let mut bytes_written = 0u64;

    loop {
        let n = source
            .read(&mut buffer)
            .map_err(|e| StorageError::WriteFailed(dest.display().to_string(), e))?;
        if n == 0 {
            break;
        }

        file.write_all(&buffer[..n]).map_err(|e| {
            error!("Write failure on {}: {}", dest.display(), e);
            StorageError::WriteFailed(dest.display().to_string(), e)
        })?;
        bytes_written += n as u64;
    }

    file.flush()
        .map_err(|e| StorageError::WriteFailed(dest.display().to_string(), e))?;

    info!("Stored {} ({} bytes)", dest.display(), bytes_written);

    Ok(StoreResult { bytes_written })
}

/// Stat checks before a download
pub fn prepare_retrieval(resolved: &Path, display: &str) -> Result<(), StorageError> {
    if !resolved.exists() {
        return Err(StorageError::NotFound(display.to_string()));
    }

    if resolved.is_dir() {
        return Err(StorageError::NotAFile(display.to_string()));
    }

    Ok(())
}

/// Renames `source` onto `dest`, creating the destination's parent first.
///
/// Atomic only within one filesystem; a cross-volume rename surfaces the
/// underlying error untouched, with no copy-and-delete fallback.
pub fn move_entry(source: &Path, dest: &Path, source_display: &str) -> Result<(), StorageError> {
    // Verify source exists
    if !source.exists() {
        return Err(StorageError::NotFound(source_display.to_string()));
    }

    if let Some(parent) = dest.parent() {
        create_dir_tree(parent).map_err(|e| {
            error!("Failed to create directory {}: {}", parent.display(), e);
            StorageError::CreateDirFailed(parent.display().to_string(), e)
        })?;
    }

    fs::rename(source, dest).map_err(|e| {
        error!(
            "Failed to move {} to {}: {}",
            source.display(),
            dest.display(),
            e
        );
        StorageError::IoError(e)
    })?;

    info!("Moved {} -> {}", source.display(), dest.display());

    Ok(())
}

/// Removes the entry at `resolved`.
///
/// Without `recursive` only files and empty directories are removed. The
/// storage root itself is never a valid target, even though it passes the
/// traversal check.
pub fn remove_entry(
    storage_root: &Path,
    resolved: &Path,
    display: &str,
    recursive: bool,
) -> Result<(), StorageError> {
    if resolved == storage_root {
        return Err(StorageError::RootProtected);
    }

    // Verify target exists
    if !resolved.exists() {
        return Err(StorageError::NotFound(display.to_string()));
    }

    if resolved.is_dir() {
        if recursive {
            match fs::remove_dir_all(resolved) {
                Ok(()) => {}
                // A descendant vanishing mid-walk still reaches the goal state.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    error!("Failed to remove {}: {}", resolved.display(), e);
                    return Err(StorageError::IoError(e));
                }
            }
        } else {
            if !is_empty_dir(resolved)? {
                return Err(StorageError::DirectoryNotEmpty(display.to_string()));
            }
            fs::remove_dir(resolved).map_err(|e| {
                error!("Failed to remove {}: {}", resolved.display(), e);
                StorageError::IoError(e)
            })?;
        }
    } else {
        fs::remove_file(resolved).map_err(|e| {
            error!("Failed to remove {}: {}", resolved.display(), e);
            StorageError::IoError(e)
        })?;
    }

    info!("Removed {} (recursive: {})", resolved.display(), recursive);

    Ok(())
}

/// Lists the contents of a directory
pub fn list_directory(resolved: &Path, display: &str) -> Result<Vec<DirEntryInfo>, StorageError> {
    if !resolved.exists() {
        return Err(StorageError::NotFound(display.to_string()));
    }

    if !resolved.is_dir() {
        return Err(StorageError::NotADirectory(display.to_string()));
    }

    let mut entries = vec![];

    for entry in fs::read_dir(resolved)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();

        match entry.metadata() {
            Ok(metadata) => {
                let size = if metadata.is_dir() { 0 } else { metadata.len() };

                let modified = metadata
                    .modified()
                    .ok()
                    .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
                    .map(|dur| dur.as_secs())
                    .unwrap_or(0);

                entries.push(DirEntryInfo {
                    name,
                    size,
                    modified,
                    is_dir: metadata.is_dir(),
                });
            }
            Err(_) => {
                // Entry disappeared between readdir and stat
                entries.push(DirEntryInfo {
                    name,
                    size: 0,
                    modified: 0,
                    is_dir: false,
                });
            }
        }
    }

    info!(
        "Listed directory {} - {} entries",
        resolved.display(),
        entries.len()
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn root() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn store_creates_parents_and_counts_bytes() {
        let root = root();
        let dest = root.path().join("reports/2024/a.txt");

        let result = store_file(&mut Cursor::new(b"hello".to_vec()), &dest).unwrap();

        assert_eq!(result.bytes_written, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
    }

    #[test]
    fn store_overwrites_existing_file() {
        let root = root();
        let dest = root.path().join("a.txt");
        fs::write(&dest, b"old contents").unwrap();

        let result = store_file(&mut Cursor::new(b"new".to_vec()), &dest).unwrap();

        assert_eq!(result.bytes_written, 3);
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn prepare_retrieval_rejects_missing_file() {
        let root = root();
        let target = root.path().join("missing.txt");

        assert!(matches!(
            prepare_retrieval(&target, "missing.txt"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn prepare_retrieval_rejects_directory() {
        let root = root();
        let dir = root.path().join("sub");
        fs::create_dir(&dir).unwrap();

        assert!(matches!(
            prepare_retrieval(&dir, "sub"),
            Err(StorageError::NotAFile(_))
        ));
    }

    #[test]
    fn move_missing_source_is_not_found() {
        let root = root();
        let source = root.path().join("missing.txt");
        let dest = root.path().join("dest.txt");

        assert!(matches!(
            move_entry(&source, &dest, "missing.txt"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn move_creates_destination_parent() {
        let root = root();
        let source = root.path().join("a.txt");
        fs::write(&source, b"data").unwrap();
        let dest = root.path().join("archive/deep/a.txt");

        move_entry(&source, &dest, "a.txt").unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"data");
    }

    #[test]
    fn move_moves_directories() {
        let root = root();
        let source = root.path().join("dir");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("inner.txt"), b"x").unwrap();
        let dest = root.path().join("moved");

        move_entry(&source, &dest, "dir").unwrap();

        assert!(!source.exists());
        assert!(dest.join("inner.txt").exists());
    }

    // rename(2) semantics on POSIX: a file replaces an existing file
    // atomically.
    #[cfg(unix)]
    #[test]
    fn move_file_replaces_existing_file() {
        let root = root();
        let source = root.path().join("a.txt");
        let dest = root.path().join("b.txt");
        fs::write(&source, b"new").unwrap();
        fs::write(&dest, b"old").unwrap();

        move_entry(&source, &dest, "a.txt").unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    // rename(2) semantics on POSIX: a directory may replace an empty
    // directory but fails on a non-empty one.
    #[cfg(unix)]
    #[test]
    fn move_dir_onto_empty_dir_succeeds() {
        let root = root();
        let source = root.path().join("src");
        let dest = root.path().join("dst");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("f.txt"), b"x").unwrap();
        fs::create_dir(&dest).unwrap();

        move_entry(&source, &dest, "src").unwrap();

        assert!(dest.join("f.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn move_dir_onto_non_empty_dir_fails() {
        let root = root();
        let source = root.path().join("src");
        let dest = root.path().join("dst");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("existing.txt"), b"x").unwrap();

        assert!(matches!(
            move_entry(&source, &dest, "src"),
            Err(StorageError::IoError(_))
        ));
    }

    #[test]
    fn remove_root_is_protected() {
        let root = root();

        assert!(matches!(
            remove_entry(root.path(), root.path(), "", false),
            Err(StorageError::RootProtected)
        ));
    }

    #[test]
    fn remove_missing_is_not_found() {
        let root = root();
        let target = root.path().join("missing.txt");

        assert!(matches!(
            remove_entry(root.path(), &target, "missing.txt", false),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn remove_file_succeeds() {
        let root = root();
        let target = root.path().join("a.txt");
        fs::write(&target, b"x").unwrap();

        remove_entry(root.path(), &target, "a.txt", false).unwrap();

        assert!(!target.exists());
    }

    #[test]
    fn remove_empty_dir_without_recursive_succeeds() {
        let root = root();
        let target = root.path().join("empty");
        fs::create_dir(&target).unwrap();

        remove_entry(root.path(), &target, "empty", false).unwrap();

        assert!(!target.exists());
    }

    #[test]
    fn remove_non_empty_dir_requires_recursive() {
        let root = root();
        let target = root.path().join("full");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner.txt"), b"x").unwrap();

        assert!(matches!(
            remove_entry(root.path(), &target, "full", false),
            Err(StorageError::DirectoryNotEmpty(_))
        ));

        remove_entry(root.path(), &target, "full", true).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn list_directory_reports_entries() {
        let root = root();
        fs::write(root.path().join("a.txt"), b"hello").unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();

        let mut entries = list_directory(root.path(), "").unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 5);
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].name, "sub");
        assert_eq!(entries[1].size, 0);
        assert!(entries[1].is_dir);
    }

    #[test]
    fn list_directory_rejects_file_target() {
        let root = root();
        let target = root.path().join("a.txt");
        fs::write(&target, b"x").unwrap();

        assert!(matches!(
            list_directory(&target, "a.txt"),
            Err(StorageError::NotADirectory(_))
        ));
    }

    #[test]
    fn list_missing_directory_is_not_found() {
        let root = root();
        let target = root.path().join("missing");

        assert!(matches!(
            list_directory(&target, "missing"),
            Err(StorageError::NotFound(_))
        ));
    }
}
