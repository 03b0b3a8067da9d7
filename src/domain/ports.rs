use super::schedule::Schedule;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// String-keyed storage the tracker persists into.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    /// Writes all entries at once. Either every entry is stored or none is.
    async fn set_all(&self, entries: Vec<(&str, String)>) -> Result<()>;
    /// Removes every entry.
    async fn clear(&self) -> Result<()>;
}

/// Loads and saves a whole schedule.
///
/// `load` returns `Ok(None)` when nothing has been saved yet. Stored data that
/// cannot be decoded is reported as `SerializationError`, `CorruptedData` or
/// `ValidationError`.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn load(&self) -> Result<Option<Schedule>>;
    async fn save(&self, schedule: &Schedule) -> Result<()>;
}

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore>;
pub type ScheduleStoreBox = Box<dyn ScheduleStore>;
pub type ClockBox = Box<dyn Clock>;
