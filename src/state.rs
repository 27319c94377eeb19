//! On-disk state: cache directory resolution, file locks and atomic writes.
//!
//! The POS model cache is shared between concurrent invocations, so writers
//! take an exclusive lock on a sidecar `.lock` file, write to a temporary file
//! and rename it into place. Readers only trust a cached file once its
//! readiness marker exists and matches the content digest.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "testcop";
const APPLICATION: &str = "testcop";
const MODEL_FILENAME: &str = "pos-model.bin";

/// Default lock timeout in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 30_000;

/// Polling interval for lock acquisition in milliseconds.
const LOCK_POLL_INTERVAL_MS: u64 = 50;

/// Platform cache directory for testcop, if the platform has one.
///
/// - Linux: `~/.cache/testcop`
/// - macOS: `~/Library/Caches/com.testcop.testcop`
/// - Windows: `%LOCALAPPDATA%\testcop\testcop\cache`
#[must_use]
pub fn cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default location of the cached POS model.
///
/// Models fetched from a custom URL get their own file keyed by the URL hash
/// so that switching URLs never serves a stale model.
#[must_use]
pub fn default_model_path(url: Option<&str>) -> Option<PathBuf> {
    let dir = cache_dir()?;
    Some(url.map_or_else(
        || dir.join(MODEL_FILENAME),
        |url| dir.join(format!("pos-model-{}.bin", &sha256_hex(url.as_bytes())[..16])),
    ))
}

/// Hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Path with an extra extension appended (`model.bin` -> `model.bin.lock`).
#[must_use]
pub fn sidecar_path(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Write `content` to `path` through a temporary file and a rename.
///
/// The temporary file lives next to the target so the rename stays on one
/// filesystem. Readers never observe a partially written target.
///
/// # Errors
/// Returns an error if the temporary file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let tmp = sidecar_path(path, &format!("tmp.{}", std::process::id()));
    let result = (|| {
        let mut file = File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

// =============================================================================
// File Locking Utilities
// =============================================================================

/// Error type for lock acquisition failures.
#[derive(Debug)]
pub enum LockError {
    /// Lock acquisition timed out.
    Timeout,
    /// I/O error during lock operation.
    Io(io::Error),
}

impl From<io::Error> for LockError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "lock acquisition timed out"),
            Self::Io(e) => write!(f, "lock I/O error: {e}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout => None,
            Self::Io(e) => Some(e),
        }
    }
}

/// Exclusive lock on a sidecar lock file, released on drop.
#[derive(Debug)]
pub struct LockFileGuard {
    file: File,
}

impl LockFileGuard {
    /// Open (creating if needed) `lock_path` and lock it exclusively.
    ///
    /// # Errors
    /// - `LockError::Timeout` if the lock cannot be acquired within `timeout_ms`
    /// - `LockError::Io` if the lock file cannot be opened or locked
    pub fn acquire(lock_path: &Path, timeout_ms: u64) -> Result<Self, LockError> {
        ensure_parent_dir(lock_path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path)?;
        try_lock_exclusive_with_timeout(&file, timeout_ms)?;
        Ok(Self { file })
    }
}

impl Drop for LockFileGuard {
    fn drop(&mut self) {
        unlock_file(&self.file);
    }
}

/// Try to acquire an exclusive (write) lock on the file with timeout.
///
/// Uses polling with [`LOCK_POLL_INTERVAL_MS`] interval.
///
/// # Errors
/// - `LockError::Timeout` if lock cannot be acquired within `timeout_ms`
/// - `LockError::Io` for other I/O errors
pub fn try_lock_exclusive_with_timeout(file: &File, timeout_ms: u64) -> Result<(), LockError> {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);

    loop {
        match file.try_lock() {
            Ok(()) => return Ok(()),
            Err(TryLockError::WouldBlock) => {
                if start.elapsed() >= timeout {
                    return Err(LockError::Timeout);
                }
                thread::sleep(poll_interval);
            }
            Err(TryLockError::Error(e)) => return Err(LockError::Io(e)),
        }
    }
}

/// Wait until `path` exists, polling until `timeout_ms` elapses.
#[must_use]
pub fn wait_for_file(path: &Path, timeout_ms: u64) -> bool {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);
    loop {
        if path.is_file() {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        thread::sleep(poll_interval);
    }
}

/// Unlock a file, releasing any held lock.
///
/// Errors are ignored.
pub fn unlock_file(file: &File) {
    let _ = file.unlock();
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
