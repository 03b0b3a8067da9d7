use crate::domain::schedule::Schedule;
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleRow {
    id: u32,
    projected_change_date: NaiveDate,
    actual_change_date: Option<NaiveDate>,
}

/// Writes a schedule as CSV, one row per aligner.
///
/// Dates are `yyyy-mm-dd`; an aligner that has not been changed yet gets an
/// empty `actual_change_date` column.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_schedule(&mut self, schedule: &Schedule) -> Result<()> {
        for aligner in schedule.aligners() {
            self.writer.serialize(ScheduleRow {
                id: aligner.id,
                projected_change_date: aligner.projected_change_date,
                actual_change_date: aligner.actual_change_date,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
