//! The schedule engine: pure date arithmetic over aligner lists.
//!
//! Every function here is total. Degenerate inputs (an appointment date
//! before today or before the anchor) produce past-dated or non-increasing
//! projections instead of errors; flagging that to the user is up to the
//! caller.

use crate::domain::aligner::{Aligner, AlignerRange};
use crate::domain::calendar::{add_fractional_days, days_between, spacing};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Builds a fresh schedule for `range`, spreading the days from `today` to
/// `appointment` evenly so the last aligner lands on the appointment date.
pub fn initialize_schedule(
    range: AlignerRange,
    appointment: NaiveDate,
    today: NaiveDate,
) -> Vec<Aligner> {
    let days_per_aligner = spacing(days_between(today, appointment), range.count());

    range
        .ids()
        .enumerate()
        .map(|(i, id)| {
            let offset = days_per_aligner * Decimal::from(i + 1);
            Aligner::new(id, add_fractional_days(today, offset))
        })
        .collect()
}

/// Re-spreads the days between `anchor_date` and `appointment` across every
/// aligner after `anchor_index`.
///
/// Aligner `anchor_index + 1 + i` is projected `(i + 1)` slots past the
/// anchor. Aligners at or before the anchor, and any later aligner that
/// already has an actual change date, are copied untouched. When nothing
/// follows the anchor the input is returned as is.
pub fn recalculate_future_projections(
    aligners: &[Aligner],
    anchor_index: usize,
    anchor_date: NaiveDate,
    appointment: NaiveDate,
) -> Vec<Aligner> {
    let mut updated = aligners.to_vec();
    let first_future = anchor_index.saturating_add(1);
    if first_future >= updated.len() {
        return updated;
    }

    let future = &mut updated[first_future..];
    let days_per_remaining = spacing(days_between(anchor_date, appointment), future.len());
    for (i, aligner) in future.iter_mut().enumerate() {
        if aligner.is_changed() {
            continue;
        }
        let offset = days_per_remaining * Decimal::from(i + 1);
        aligner.projected_change_date = add_fractional_days(anchor_date, offset);
    }

    updated
}

/// The aligner with the chronologically latest actual change date, as
/// `(index, date)`. Ties go to the later aligner in wear order.
pub fn latest_actual_change(aligners: &[Aligner]) -> Option<(usize, NaiveDate)> {
    aligners
        .iter()
        .enumerate()
        .filter_map(|(index, a)| a.actual_change_date.map(|date| (index, date)))
        .max_by_key(|&(_, date)| date)
}
