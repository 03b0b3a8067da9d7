use super::state::TrackerState;
use crate::domain::aligner::AlignerRange;
use crate::domain::calendar::parse_date;
use crate::domain::ports::{ClockBox, ScheduleStoreBox};
use crate::domain::schedule::Schedule;
use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use tracing::{info, warn};

/// The tracker state controller.
///
/// `Tracker` owns the authoritative in-memory state, turns user intents into
/// state transitions and keeps the schedule store in sync. Each transition is
/// saved before it is committed in memory, so a failed save leaves the
/// tracker exactly as it was.
pub struct Tracker {
    state: TrackerState,
    store: ScheduleStoreBox,
    clock: ClockBox,
}

impl Tracker {
    /// Creates an uninitialized tracker without reading the store.
    pub fn new(store: ScheduleStoreBox, clock: ClockBox) -> Self {
        Self {
            state: TrackerState::Uninitialized,
            store,
            clock,
        }
    }

    /// Restores the saved session, if any.
    ///
    /// Saved data that cannot be decoded is treated as no session at all.
    pub async fn load(store: ScheduleStoreBox, clock: ClockBox) -> Result<Self> {
        let state = match store.load().await {
            Ok(Some(schedule)) => TrackerState::Active(schedule),
            Ok(None) => TrackerState::Uninitialized,
            Err(
                e @ (TrackerError::SerializationError(_)
                | TrackerError::CorruptedData(_)
                | TrackerError::ValidationError(_)),
            ) => {
                warn!(error = %e, "Discarding unreadable saved schedule");
                TrackerState::Uninitialized
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            state,
            store,
            clock,
        })
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.state.schedule()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Starts a schedule for aligners `start_id..=end_id` ending on the
    /// `yyyy-mm-dd` appointment date. Invalid input leaves the state alone.
    pub async fn setup(
        &mut self,
        appointment_input: &str,
        start_id: u32,
        end_id: u32,
    ) -> Result<&TrackerState> {
        let appointment = parse_date(appointment_input)?;
        let range = AlignerRange::new(start_id, end_id)?;
        let today = self.clock.today();

        info!(start_id, end_id, %appointment, %today, "Setting up schedule");
        let next = self.state.clone().setup(range, appointment, today);
        self.commit(next).await
    }

    /// Marks aligner `id` as changed today. Unknown ids are ignored.
    pub async fn confirm_change(&mut self, id: u32) -> Result<&TrackerState> {
        let today = self.clock.today();

        info!(aligner = id, %today, "Confirming aligner change");
        let next = self.state.clone().confirm_change(id, today);
        self.commit(next).await
    }

    /// Overwrites the actual change date of aligner `id` with the
    /// `yyyy-mm-dd` date in `new_date_input`. Unknown ids are ignored.
    pub async fn edit_actual_date(
        &mut self,
        id: u32,
        new_date_input: &str,
    ) -> Result<&TrackerState> {
        let date = parse_date(new_date_input)?;

        info!(aligner = id, %date, "Editing actual change date");
        let next = self.state.clone().edit_actual_date(id, date);
        self.commit(next).await
    }

    async fn commit(&mut self, next: TrackerState) -> Result<&TrackerState> {
        if next != self.state
            && let TrackerState::Active(schedule) = &next
            && !schedule.aligners().is_empty()
        {
            self.store.save(schedule).await?;
        }

        self.state = next;
        Ok(&self.state)
    }
}
