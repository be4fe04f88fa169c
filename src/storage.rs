use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Key holding the persisted widget width in columns.
pub const WIDTH_KEY: &str = "width";
/// Key holding the task slots as a JSON array.
pub const TASKS_KEY: &str = "tasks";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("store file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

type Result<T> = std::result::Result<T, StorageError>;

/// String key-value store backed by a JSON object on disk.
///
/// Every `set` rewrites the whole file through a temporary file in the same
/// directory, so readers never observe a half-written store.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl JsonStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "store opened");
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A store that lives only as long as the process.
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and flush the store to disk.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if self.entries.get(key) == Some(&value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        let json = serde_json::to_string_pretty(&self.entries)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path)?;

        tracing::trace!(path = %path.display(), "store flushed");
        Ok(())
    }
}
