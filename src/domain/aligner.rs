use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A single numbered aligner in the treatment.
///
/// The `id` is the physical aligner number and also its position in wear
/// order. Once `actual_change_date` is set, `projected_change_date` is
/// historical and is never recomputed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Aligner {
    pub id: u32,
    pub projected_change_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_change_date: Option<NaiveDate>,
}

impl Aligner {
    pub fn new(id: u32, projected_change_date: NaiveDate) -> Self {
        Self {
            id,
            projected_change_date,
            actual_change_date: None,
        }
    }

    /// Whether the user has recorded swapping this aligner out.
    pub fn is_changed(&self) -> bool {
        self.actual_change_date.is_some()
    }
}

/// Largest number of aligners a single schedule may hold.
pub const MAX_ALIGNERS: u32 = 1000;

/// An inclusive, non-empty range of positive aligner numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignerRange {
    start: u32,
    end: u32,
}

impl AlignerRange {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start == 0 {
            return Err(TrackerError::ValidationError(
                "Aligner numbers must be positive".to_string(),
            ));
        }
        if start > end {
            return Err(TrackerError::ValidationError(format!(
                "First aligner ({start}) must not be after the last aligner ({end})"
            )));
        }
        if end - start >= MAX_ALIGNERS {
            return Err(TrackerError::ValidationError(format!(
                "A schedule holds at most {MAX_ALIGNERS} aligners, got {}",
                u64::from(end - start) + 1
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of aligners in the range. Never zero.
    pub fn count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn ids(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}
