use super::engine::{initialize_schedule, latest_actual_change, recalculate_future_projections};
use crate::domain::aligner::AlignerRange;
use crate::domain::schedule::Schedule;
use chrono::NaiveDate;
use tracing::debug;

/// Tracker lifecycle. `setup` moves `Uninitialized` to `Active`; every other
/// transition loops on `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Uninitialized,
    Active(Schedule),
}

impl TrackerState {
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            TrackerState::Active(schedule) => Some(schedule),
            TrackerState::Uninitialized => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TrackerState::Active(_))
    }

    /// Starts a new schedule, replacing whatever was there.
    pub fn setup(self, range: AlignerRange, appointment: NaiveDate, today: NaiveDate) -> Self {
        let aligners = initialize_schedule(range, appointment, today);
        TrackerState::Active(Schedule::new(aligners, appointment))
    }

    /// Records that aligner `id` was changed on `today` and re-spreads the
    /// aligners after it.
    pub fn confirm_change(self, id: u32, today: NaiveDate) -> Self {
        let TrackerState::Active(schedule) = self else {
            return TrackerState::Uninitialized;
        };
        let Some(index) = schedule.position(id) else {
            debug!(aligner = id, "confirm for unknown aligner ignored");
            return TrackerState::Active(schedule);
        };

        let mut aligners = schedule.aligners().to_vec();
        aligners[index].actual_change_date = Some(today);
        let aligners =
            recalculate_future_projections(&aligners, index, today, schedule.appointment_date());

        TrackerState::Active(schedule.with_aligners(aligners))
    }

    /// Overwrites the actual change date of aligner `id`.
    ///
    /// The recalculation anchor is the aligner with the chronologically
    /// latest actual date across the whole schedule, which need not be the
    /// one just edited. Out-of-order edits are accepted as is.
    pub fn edit_actual_date(self, id: u32, date: NaiveDate) -> Self {
        let TrackerState::Active(schedule) = self else {
            return TrackerState::Uninitialized;
        };
        let Some(index) = schedule.position(id) else {
            debug!(aligner = id, "edit for unknown aligner ignored");
            return TrackerState::Active(schedule);
        };

        let mut aligners = schedule.aligners().to_vec();
        aligners[index].actual_change_date = Some(date);

        let Some((anchor_index, anchor_date)) = latest_actual_change(&aligners) else {
            return TrackerState::Active(schedule.with_aligners(aligners));
        };
        debug!(
            edited = id,
            anchor = aligners[anchor_index].id,
            %anchor_date,
            "recalculating from latest actual change"
        );
        let aligners = recalculate_future_projections(
            &aligners,
            anchor_index,
            anchor_date,
            schedule.appointment_date(),
        );

        TrackerState::Active(schedule.with_aligners(aligners))
    }
}
