//! # File I/O Module
//!
//! Saves and loads calculation history files:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **File locking**: Prevent two sessions appending to the same history
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Histories are saved as `.bolt` files containing JSON.
//! Lock files use `.bolt.lock` extension with metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bolt_core::file_io::{load_or_create, save_project, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("history.bolt");
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! let project = load_or_create(path)?;
//! save_project(&project, path)?;
//! drop(lock);
//! # Ok::<(), bolt_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Lock file metadata stored in .bolt.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Combines an OS-level lock (fs2) with a `.lock` sidecar file that records
/// who holds it.
pub struct FileLock {
    history_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a history file.
    ///
    /// The OS lock on the sidecar decides who holds the history. A sidecar
    /// left behind by a process that no longer exists carries no OS lock and
    /// is taken over.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // Open without truncating so a failed attempt leaves the holder's record intact.
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(match read_lock_info(&lock_path) {
                Ok(existing) => CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ),
                Err(_) => CalcError::file_locked(path.display().to_string(), "another process", "unknown"),
            });
        }

        if let Ok(previous) = read_lock_info(&lock_path) {
            warn!(
                path = %path.display(),
                holder = %previous.user_id,
                pid = previous.pid,
                "taking over stale history lock"
            );
        }

        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file
            .set_len(0)
            .and_then(|_| lock_file.seek(SeekFrom::Start(0)))
            .and_then(|_| lock_file.write_all(lock_json.as_bytes()))
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(FileLock {
            history_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns the holder's metadata only while its OS lock is still held.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        let sidecar = File::open(&lock_path).ok()?;
        if sidecar.try_lock_shared().is_ok() {
            let _ = sidecar.unlock();
            return None;
        }
        read_lock_info(&lock_path).ok()
    }

    /// Get the path to the history file
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock is released when _lock_file is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Get the lock file path for a history file
fn lock_path_for(history_path: &Path) -> PathBuf {
    let mut lock_path = history_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path)
        .map_err(|e| CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save a history to a file with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;

    let tmp_path = path.with_extension("bolt.tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), items = project.item_count(), "saved calculation history");
    Ok(())
}

/// Load a history from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded history
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&project.meta.version)?;

    info!(path = %path.display(), items = project.item_count(), "loaded calculation history");
    Ok(project)
}

/// Load a history, or start an empty one if the file does not exist yet.
pub fn load_or_create(path: &Path) -> CalcResult<Project> {
    match fs::metadata(path) {
        Ok(_) => load_project(path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Project::default()),
        Err(e) => Err(CalcError::file_error("stat", path.display().to_string(), e.to_string())),
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x, a newer minor version may contain breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, BoltInput};
    use tempfile::TempDir;

    fn temp_history_path(dir: &TempDir) -> PathBuf {
        dir.path().join("history.bolt")
    }

    fn sample_project() -> Project {
        let mut project = Project::new("Test Engineer", "TEST-001");
        let input = BoltInput {
            label: "B1".to_string(),
            grade: "4.6".to_string(),
            diameter_mm: 16.0,
            threaded_length_mm: 400.0,
            threaded_planes: 1,
            unthreaded_planes: 1,
        };
        let result = calculate(&input).unwrap();
        project.add_calculation(input, result);
        project
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/history.bolt"));
        assert_eq!(lock_path, Path::new("/path/to/history.bolt.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        let project = sample_project();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.items, project.items);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        save_project(&Project::default(), &path).unwrap();

        assert!(!path.with_extension("bolt.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_load_or_create_missing_file() {
        let dir = TempDir::new().unwrap();
        let project = load_or_create(&temp_history_path(&dir)).unwrap();
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_project(&path), Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.history_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());
        assert!(FileLock::check(&path).is_some());

        drop(lock);
        assert!(!lock_path.exists());
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_second_acquire_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        let _lock = FileLock::acquire(&path, "first@example.com").unwrap();
        let err = FileLock::acquire(&path, "second@example.com").err().unwrap();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_lock_left_by_dead_process_is_reclaimed() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        let crashed = LockInfo {
            user_id: "crashed".to_string(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: 4_000_000,
            locked_at: Utc::now(),
        };
        let padding = " ".repeat(512);
        fs::write(
            lock_path_for(&path),
            format!("{}{}", serde_json::to_string_pretty(&crashed).unwrap(), padding),
        )
        .unwrap();
        assert!(FileLock::check(&path).is_none());

        let lock = FileLock::acquire(&path, "next@example.com").unwrap();
        let on_disk = read_lock_info(&lock_path_for(&path)).unwrap();
        assert_eq!(on_disk.user_id, "next@example.com");
        assert_eq!(on_disk.pid, std::process::id());
        drop(lock);
    }

    #[test]
    fn test_rejected_acquire_keeps_holder_record() {
        let dir = TempDir::new().unwrap();
        let path = temp_history_path(&dir);

        let _lock = FileLock::acquire(&path, "first@example.com").unwrap();
        match FileLock::acquire(&path, "second@example.com") {
            Err(CalcError::FileLocked { locked_by, .. }) => assert!(locked_by.starts_with("first@example.com")),
            other => panic!("expected FileLocked, got {:?}", other.map(|l| l.info.clone())),
        }
        let on_disk = read_lock_info(&lock_path_for(&path)).unwrap();
        assert_eq!(on_disk.user_id, "first@example.com");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
