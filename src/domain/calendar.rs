use crate::error::{Result, TrackerError};
use chrono::{NaiveDate, TimeDelta};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Input and storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format used when showing dates to the user.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parses a `yyyy-mm-dd` calendar date. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        TrackerError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Signed number of whole calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Exact, unrounded number of days each of `count` slots gets out of `total_days`.
///
/// `count` must be non-zero.
pub fn spacing(total_days: i64, count: usize) -> Decimal {
    Decimal::from(total_days) / Decimal::from(count)
}

/// Adds a possibly fractional number of days to `date`.
///
/// The offset is rounded to the nearest whole day with ties going away from
/// zero, so `+2.5` becomes `+3` and `-2.5` becomes `-3`. Results outside the
/// representable range saturate at `NaiveDate::MIN`/`NaiveDate::MAX`.
pub fn add_fractional_days(date: NaiveDate, days: Decimal) -> NaiveDate {
    let whole = days.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let saturated = if whole.is_sign_negative() {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    };

    whole
        .to_i64()
        .and_then(TimeDelta::try_days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(saturated)
}
