//! Advisory single-writer lock for a project directory.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::errors::LockError;

/// Held for the duration of a batch or reconstruction run; released on drop.
#[derive(Debug)]
pub struct ProjectLock {
    file: File,
    path: PathBuf,
}

impl ProjectLock {
    /// Take the lock without waiting.
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LockError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| LockError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        file.try_lock_exclusive().map_err(|_| LockError::Held {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.lock");
        let lock = ProjectLock::acquire(&path).unwrap();
        assert_eq!(lock.path(), path);

        let err = ProjectLock::acquire(&path).unwrap_err();
        assert!(matches!(err, LockError::Held { .. }));

        drop(lock);
        assert!(ProjectLock::acquire(&path).is_ok());
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".lexiforge").join("batch.lock");
        assert!(ProjectLock::acquire(&path).is_ok());
    }
}
