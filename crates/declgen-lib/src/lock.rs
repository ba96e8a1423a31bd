//! Scoped cross-process mutual exclusion.
//!
//! Multiple OS processes may target the same combined output file or the
//! same snapshot. The promote-and-rename step and the snapshot save are
//! guarded by a named lock keyed by the normalized final path: an advisory
//! exclusive lock on a `.lock` sibling file, held only for the duration of
//! the step and released on drop, including during unwinding. A crashed
//! holder leaving the file locked is a documented limitation.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Capability to take a named lock, swappable for tests.
pub trait Locker {
    fn lock(&self, key: &Path) -> io::Result<Guard>;
}

/// Held lock. Releases on drop.
pub enum Guard {
    File(File),
    Noop,
}

impl Drop for Guard {
    fn drop(&mut self) {
        if let Guard::File(file) = self {
            let _ = FileExt::unlock(file);
        }
    }
}

/// File-backed named lock: `<normalized key>.lock` next to the target.
pub struct FileLocker;

impl Locker for FileLocker {
    fn lock(&self, key: &Path) -> io::Result<Guard> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path(key))?;
        file.lock_exclusive()?;
        Ok(Guard::File(file))
    }
}

/// No-op lock for in-process use and tests.
pub struct NullLocker;

impl Locker for NullLocker {
    fn lock(&self, _key: &Path) -> io::Result<Guard> {
        Ok(Guard::Noop)
    }
}

/// Lock-file path for a target: the normalized target path with `.lock`
/// appended, so every process agrees on the same name regardless of how
/// the target was spelled.
pub fn lock_path(key: &Path) -> PathBuf {
    let normalized = std::path::absolute(key).unwrap_or_else(|_| key.to_path_buf());
    let mut name = normalized.into_os_string();
    name.push(".lock");
    PathBuf::from(name)
}
