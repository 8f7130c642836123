//! Cross-process lock on the working directory
//!
//! The lock is a file holding the owner's process id. A lock whose file was
//! last modified longer ago than the staleness window is taken over.

use crate::error::ProcessorError;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Held lock; released on drop
#[derive(Debug)]
pub struct ProcessLock {
    path: PathBuf,
    pid: u32,
}

impl ProcessLock {
    /// Acquire the lock at `path`
    ///
    /// The lock file is created exclusively, so of several processes starting
    /// together only one wins. Fails with [`ProcessorError::LockConflict`]
    /// when a fresh lock exists. Failing to write the lock file is logged and
    /// otherwise ignored.
    pub fn acquire(path: &Path, stale_after: Duration) -> Result<Self, ProcessorError> {
        let pid = std::process::id();

        match create_lock_file(path, pid) {
            Ok(()) => debug!("Acquired lock {} for pid {}", path.display(), pid),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let (age, holder) = inspect(path);
                if age < stale_after {
                    return Err(conflict(path, holder));
                }
                warn!(
                    "Taking over stale lock {} (held by {}, {}s old)",
                    path.display(),
                    holder,
                    age.as_secs()
                );

                if let Err(e) = fs::remove_file(path) {
                    if e.kind() != ErrorKind::NotFound {
                        warn!("Could not remove stale lock {}: {}", path.display(), e);
                    }
                }
                match create_lock_file(path, pid) {
                    Ok(()) => debug!("Acquired lock {} for pid {}", path.display(), pid),
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                        return Err(conflict(path, inspect(path).1));
                    }
                    Err(e) => warn!("Could not write lock file {}: {}", path.display(), e),
                }
            }
            Err(e) => warn!("Could not write lock file {}: {}", path.display(), e),
        }

        Ok(Self {
            path: path.to_path_buf(),
            pid,
        })
    }

    /// Whether the lock file still names this process
    pub fn is_held(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|s| s.trim() == self.pid.to_string())
            .unwrap_or(false)
    }
}

/// Create the lock file, failing if it already exists
fn create_lock_file(path: &Path, pid: u32) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = file.write_all(pid.to_string().as_bytes()) {
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// Age and recorded holder of an existing lock file
fn inspect(path: &Path) -> (Duration, String) {
    let age = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .unwrap_or(Duration::ZERO);
    let holder = fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    (age, holder)
}

fn conflict(path: &Path, holder: String) -> ProcessorError {
    ProcessorError::LockConflict {
        path: path.to_path_buf(),
        holder,
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        if !self.is_held() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Released lock {}", self.path.display()),
            Err(e) => warn!("Could not remove lock file {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WINDOW: Duration = Duration::from_secs(600);

    #[test]
    fn test_acquire_writes_pid_and_release_removes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");

        let lock = ProcessLock::acquire(&path, WINDOW).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            std::process::id().to_string()
        );
        assert!(lock.is_held());

        drop(lock);
        assert!(!path.exists());
    }

    #[test]
    fn test_fresh_lock_conflicts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");
        fs::write(&path, "424242").unwrap();

        match ProcessLock::acquire(&path, WINDOW) {
            Err(ProcessorError::LockConflict { holder, .. }) => assert_eq!(holder, "424242"),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "424242");
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");
        fs::write(&path, "424242").unwrap();

        let lock = ProcessLock::acquire(&path, Duration::ZERO).unwrap();
        assert!(lock.is_held());
    }

    #[test]
    fn test_foreign_lock_survives_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");

        let lock = ProcessLock::acquire(&path, WINDOW).unwrap();
        fs::write(&path, "424242").unwrap();
        drop(lock);

        assert_eq!(fs::read_to_string(&path).unwrap(), "424242");
    }

    #[test]
    fn test_simultaneous_acquire_has_one_winner() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ProcessLock::acquire(&path, WINDOW)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, ProcessorError::LockConflict { .. })));
    }

    #[test]
    fn test_unwritable_lock_does_not_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("test.lock");

        let lock = ProcessLock::acquire(&path, WINDOW).unwrap();
        assert!(!lock.is_held());
    }
}
