use crate::domain::calendar::DISPLAY_FORMAT;
use crate::domain::schedule::Schedule;
use chrono::NaiveDate;
use std::fmt;

/// Human-readable schedule table.
///
/// The current aligner is marked with `>`; dates are `dd/mm/yyyy`.
pub struct ScheduleView<'a> {
    schedule: &'a Schedule,
    today: NaiveDate,
}

impl<'a> ScheduleView<'a> {
    pub fn new(schedule: &'a Schedule, today: NaiveDate) -> Self {
        Self { schedule, today }
    }
}

impl fmt::Display for ScheduleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Appointment: {}",
            self.schedule.appointment_date().format(DISPLAY_FORMAT)
        )?;
        writeln!(f, "  {:>7}  {:<10}  {:<10}", "Aligner", "Projected", "Changed")?;

        let current = self.schedule.current_index();
        for (index, aligner) in self.schedule.aligners().iter().enumerate() {
            let marker = if current == Some(index) { '>' } else { ' ' };
            let changed = aligner
                .actual_change_date
                .map(|d| d.format(DISPLAY_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{} {:>7}  {:<10}  {:<10}",
                marker,
                aligner.id,
                aligner.projected_change_date.format(DISPLAY_FORMAT).to_string(),
                changed
            )?;
        }

        if self.schedule.is_complete() {
            writeln!(f, "All aligners changed.")?;
        } else if self.schedule.is_behind(self.today) {
            writeln!(f, "Behind schedule: the current aligner was due for a change.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aligner::Aligner;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule() -> Schedule {
        let mut first = Aligner::new(1, date(2026, 11, 8));
        first.actual_change_date = Some(date(2026, 11, 7));
        Schedule::new(
            vec![first, Aligner::new(2, date(2026, 11, 28))],
            date(2026, 11, 28),
        )
    }

    #[test]
    fn test_view_marks_current_aligner() {
        let rendered = ScheduleView::new(&schedule(), date(2026, 11, 10)).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Appointment: 28/11/2026");
        assert_eq!(lines[2], "        1  08/11/2026  07/11/2026");
        assert_eq!(lines[3], ">       2  28/11/2026  -         ");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_view_reports_overrun() {
        let rendered = ScheduleView::new(&schedule(), date(2026, 11, 29)).to_string();
        assert!(rendered.contains("Behind schedule"));
    }
}
