use crate::domain::aligner::Aligner;
use crate::domain::ports::{KeyValueStoreBox, ScheduleStore};
use crate::domain::schedule::Schedule;
use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Key holding the JSON aligner list.
pub const ALIGNERS_KEY: &str = "aligners";
/// Key holding the JSON appointment date.
pub const APPOINTMENT_DATE_KEY: &str = "appointmentDate";

/// Stores a schedule as two entries of a `KeyValueStore`.
///
/// A session exists only when both entries are present. Both entries are
/// written in a single `set_all`, so a failed save never pairs a new aligner
/// list with an old appointment date. There is no schema version; changing
/// the stored shape breaks existing saves.
pub struct KeyValueScheduleStore {
    store: KeyValueStoreBox,
}

impl KeyValueScheduleStore {
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ScheduleStore for KeyValueScheduleStore {
    async fn load(&self) -> Result<Option<Schedule>> {
        let aligners = self.store.get(ALIGNERS_KEY).await?;
        let appointment = self.store.get(APPOINTMENT_DATE_KEY).await?;
        let (Some(aligners), Some(appointment)) = (aligners, appointment) else {
            return Ok(None);
        };

        let aligners: Vec<Aligner> = serde_json::from_str(&aligners)?;
        let appointment: NaiveDate = serde_json::from_str(&appointment)?;
        if aligners.is_empty() {
            return Ok(None);
        }

        let schedule = Schedule::new(aligners, appointment);
        if !schedule.has_contiguous_ids() {
            return Err(TrackerError::ValidationError(
                "Saved aligner numbers are not a contiguous range".to_string(),
            ));
        }
        Ok(Some(schedule))
    }

    async fn save(&self, schedule: &Schedule) -> Result<()> {
        let aligners = serde_json::to_string(schedule.aligners())?;
        let appointment = serde_json::to_string(&schedule.appointment_date())?;

        self.store
            .set_all(vec![
                (ALIGNERS_KEY, aligners),
                (APPOINTMENT_DATE_KEY, appointment),
            ])
            .await
    }
}
