#![allow(dead_code)]

use aligner_tracker::application::tracker::Tracker;
use aligner_tracker::domain::calendar::parse_date;
use aligner_tracker::domain::ports::KeyValueStoreBox;
use aligner_tracker::infrastructure::clock::FixedClock;
use aligner_tracker::infrastructure::kv_schedule::KeyValueScheduleStore;
use chrono::NaiveDate;

pub fn date(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

/// Loads a tracker over `store` with the clock pinned to `today`.
pub async fn tracker_on(store: KeyValueStoreBox, today: &str) -> Tracker {
    Tracker::load(
        Box::new(KeyValueScheduleStore::new(store)),
        Box::new(FixedClock::new(date(today))),
    )
    .await
    .expect("Failed to load tracker")
}

pub fn projected(tracker: &Tracker) -> Vec<NaiveDate> {
    tracker
        .schedule()
        .expect("tracker should be active")
        .aligners()
        .iter()
        .map(|a| a.projected_change_date)
        .collect()
}
