//! File-backed key-value store.
//!
//! Each key is kept as `<data-dir>/<key>.json`, holding exactly the string
//! the persistence layer hands over. The data dir is created on first write.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tui_memory_core::persist::{KeyValueStore, StoreError};

pub use tui_memory_core as core;

const APP_DIR_NAME: &str = "tui-memory";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`default_data_dir`].
    pub fn open_default() -> Self {
        Self::new(default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

/// Keys become file names, so only a conservative alphabet is allowed.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// `$XDG_DATA_HOME/tui-memory`, then `~/.local/share/tui-memory`, then the
/// working directory.
pub fn default_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME"),
        std::env::var_os("HOME"),
    )
    .unwrap_or_else(cwd_data_dir)
}

fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = xdg_data_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|v| !v.is_empty()).map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".local");
                p.push("share");
                p
            })
        })?;

    Some(base.join(APP_DIR_NAME))
}

fn cwd_data_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{APP_DIR_NAME}"))
}
