//! Filesystem mounting — DSN-dispatched mounts with a pass-through cache.
//!
//! [`FilesystemFactory::create`] resolves a [`Dsn`] into a mounted
//! [`Filesystem`] handle. Handles are cached per DSN: only the first call
//! mounts, repeated lookups return the same handle.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::dsn::Dsn;
use crate::error::FilesystemError;

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FilesystemError {
    FilesystemError::Io { path: path.into(), source }
}

// ---------------------------------------------------------------------------
// Filesystem handle
// ---------------------------------------------------------------------------

/// A mounted storage handle rooted at a path prefix.
///
/// All relative paths are resolved against the mount root. Writing creates
/// missing parent directories.
#[derive(Debug)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    fn local(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The mount root (path prefix) of this handle.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` against the mount root.
    pub fn full_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.full_path(relative).exists()
    }

    pub fn read_to_string(&self, relative: &str) -> Result<String, FilesystemError> {
        let path = self.full_path(relative);
        fs::read_to_string(&path).map_err(|e| io_err(path, e))
    }

    pub fn write(
        &self,
        relative: &str,
        contents: impl AsRef<[u8]>,
    ) -> Result<(), FilesystemError> {
        let path = self.full_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| io_err(path, e))
    }
}

// ---------------------------------------------------------------------------
// Mount factory
// ---------------------------------------------------------------------------

/// Mount factory with a per-DSN cache of live handles.
#[derive(Debug, Default)]
pub struct FilesystemFactory {
    mounts: Mutex<HashMap<Dsn, Arc<Filesystem>>>,
}

impl FilesystemFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the filesystem mounted for `dsn`, mounting it on first use.
    ///
    /// The cache is keyed by the full DSN; a hit returns the existing
    /// handle. Fails with [`FilesystemError::UnsupportedScheme`] for schemes
    /// without a mount strategy.
    pub fn create(&self, dsn: &Dsn) -> Result<Arc<Filesystem>, FilesystemError> {
        // A poisoned lock only means another mount panicked; the map itself
        // is still valid.
        let mut mounts = self
            .mounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = mounts.get(dsn) {
            return Ok(Arc::clone(existing));
        }

        let filesystem = match dsn.scheme() {
            "file" => Arc::new(Filesystem::local(dsn.path())),
            scheme => {
                return Err(FilesystemError::UnsupportedScheme {
                    scheme: scheme.to_owned(),
                    dsn: dsn.to_string(),
                })
            }
        };

        tracing::debug!(dsn = %dsn, "mounted filesystem");
        mounts.insert(dsn.clone(), Arc::clone(&filesystem));
        Ok(filesystem)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
