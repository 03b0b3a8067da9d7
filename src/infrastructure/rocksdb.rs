use crate::domain::ports::KeyValueStore;
use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the tracker entries.
pub const CF_TRACKER: &str = "tracker";

/// A persistent key-value store implementation using RocksDB.
///
/// Keys and values are stored as UTF-8 bytes in their own Column Family.
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "tracker" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_tracker = ColumnFamilyDescriptor::new(CF_TRACKER, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_tracker])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_TRACKER).ok_or_else(|| {
            TrackerError::InternalError(Box::new(std::io::Error::other(
                "Tracker column family not found",
            )))
        })
    }
}

#[async_trait]
impl KeyValueStore for RocksDBStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cf = self.cf()?;
        let Some(bytes) = self.db.get_cf(cf, key.as_bytes())? else {
            return Ok(None);
        };

        let value = String::from_utf8(bytes).map_err(|e| {
            TrackerError::CorruptedData(format!("Stored value for '{}' is not UTF-8: {}", key, e))
        })?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let cf = self.cf()?;
        self.db.put_cf(cf, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    async fn set_all(&self, entries: Vec<(&str, String)>) -> Result<()> {
        let cf = self.cf()?;
        let mut batch = WriteBatch::default();
        for (key, value) in &entries {
            batch.put_cf(cf, key.as_bytes(), value.as_bytes());
        }
        self.db.write(batch)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let cf = self.cf()?;
        let mut batch = WriteBatch::default();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, _value) = item?;
            batch.delete_cf(cf, key);
        }
        self.db.write(batch)?;
        Ok(())
    }
}
