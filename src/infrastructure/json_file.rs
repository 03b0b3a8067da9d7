use crate::domain::ports::KeyValueStore;
use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::warn;

type Entries = BTreeMap<String, String>;

/// A key-value store kept as a single JSON object on disk.
///
/// Every `set` rewrites the whole file through a temporary file in the same
/// directory followed by a rename, so a crash never leaves a half-written
/// file behind. A missing file reads as an empty store.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<Entries> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_all(vec![(key, value)]).await
    }

    async fn set_all(&self, new_entries: Vec<(&str, String)>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(TrackerError::SerializationError(e)) => {
                warn!(path = %self.path.display(), error = %e, "Overwriting unreadable store file");
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        for (key, value) in new_entries {
            entries.insert(key.to_string(), value);
        }
        self.write_entries(&entries)
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
