//! Filesystem-backed resource storage
//!
//! Maps request paths under a root directory and wraps the file
//! operations the handlers need. Every operation goes through
//! [`PathLocks`], so two requests touching the same file are serialized.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::resource::locks::PathLocks;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("resource not found")]
    NotFound,
    #[error("path {0:?} escapes the resource root")]
    InvalidPath(String),
    #[error(transparent)]
    Io(std::io::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// File CRUD rooted at one directory.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    root: PathBuf,
    locks: PathLocks,
}

impl ResourceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: PathLocks::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn locks(&self) -> &PathLocks {
        &self.locks
    }

    /// Map a request path onto the root.
    ///
    /// Query strings and fragments are cut off, empty and `.` segments
    /// dropped. `..`, backslashes, NUL bytes and paths naming the root
    /// itself are rejected.
    ///
    /// ```
    /// # use fileserve::resource::store::ResourceStore;
    /// let store = ResourceStore::new("/srv");
    /// assert_eq!(
    ///     store.resolve("/docs/./a.txt?x=1").unwrap(),
    ///     std::path::PathBuf::from("/srv/docs/a.txt"),
    /// );
    /// assert!(store.resolve("/../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, request_path: &str) -> StoreResult<PathBuf> {
        let invalid = || StoreError::InvalidPath(request_path.to_string());

        let path = request_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        if !path.starts_with('/') {
            return Err(invalid());
        }

        let mut relative = PathBuf::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(invalid()),
                s if s.contains(['\\', '\0']) => return Err(invalid()),
                s => relative.push(s),
            }
        }

        if relative.as_os_str().is_empty()
            || !relative.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(invalid());
        }

        Ok(self.root.join(relative))
    }

    /// Whether a file exists at `path`.
    ///
    /// Takes its own read lock, so never call it while holding a guard
    /// on the same path; the mutating operations check existence inline.
    pub async fn exists(&self, path: &Path) -> StoreResult<bool> {
        let _guard = self.locks.read(path).await;
        Ok(fs::try_exists(path).await?)
    }

    /// Read the whole file.
    pub async fn read(&self, path: &Path) -> StoreResult<Vec<u8>> {
        let _guard = self.locks.read(path).await;
        Ok(fs::read(path).await?)
    }

    /// Append to an existing file. A missing file is an I/O failure, not
    /// `NotFound`: appends never create.
    pub async fn append(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let _guard = self.locks.write(path).await;

        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .map_err(StoreError::Io)?;

        file.write_all(bytes).await.map_err(StoreError::Io)?;
        file.flush().await.map_err(StoreError::Io)?;
        Ok(())
    }

    /// Create the file if needed and replace its contents.
    pub async fn overwrite(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let _guard = self.locks.write(path).await;
        fs::write(path, bytes).await.map_err(StoreError::Io)
    }

    /// Delete the file. `NotFound` if it does not exist.
    pub async fn delete(&self, path: &Path) -> StoreResult<()> {
        let _guard = self.locks.write(path).await;

        if !fs::try_exists(path).await? {
            return Err(StoreError::NotFound);
        }

        Ok(fs::remove_file(path).await?)
    }
}
