use super::aligner::Aligner;
use chrono::NaiveDate;

/// The aligner list together with the target appointment date.
///
/// Aligners are always kept sorted by ascending `id`, which is also the
/// chronological wear order the engine slices on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    aligners: Vec<Aligner>,
    appointment_date: NaiveDate,
}

impl Schedule {
    pub fn new(mut aligners: Vec<Aligner>, appointment_date: NaiveDate) -> Self {
        aligners.sort_by_key(|a| a.id);
        Self {
            aligners,
            appointment_date,
        }
    }

    pub fn aligners(&self) -> &[Aligner] {
        &self.aligners
    }

    pub fn appointment_date(&self) -> NaiveDate {
        self.appointment_date
    }

    /// Replaces the aligner list, keeping the appointment date.
    pub fn with_aligners(self, aligners: Vec<Aligner>) -> Self {
        Self::new(aligners, self.appointment_date)
    }

    /// Index of the aligner numbered `id`.
    pub fn position(&self, id: u32) -> Option<usize> {
        self.aligners.binary_search_by_key(&id, |a| a.id).ok()
    }

    pub fn get(&self, id: u32) -> Option<&Aligner> {
        self.position(id).map(|index| &self.aligners[index])
    }

    /// Index of the aligner currently being worn: the first one without an
    /// actual change date.
    pub fn current_index(&self) -> Option<usize> {
        self.aligners.iter().position(|a| !a.is_changed())
    }

    pub fn current(&self) -> Option<&Aligner> {
        self.current_index().map(|index| &self.aligners[index])
    }

    pub fn is_complete(&self) -> bool {
        self.current_index().is_none()
    }

    /// True when the current aligner should already have been changed.
    pub fn is_behind(&self, today: NaiveDate) -> bool {
        self.current()
            .is_some_and(|a| a.projected_change_date < today)
    }

    /// Whether the ids form a gap-free, duplicate-free ascending run.
    pub fn has_contiguous_ids(&self) -> bool {
        self.aligners.windows(2).all(|w| w[0].id.checked_add(1) == Some(w[1].id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Schedule {
        let mut first = Aligner::new(2, date(2026, 11, 1));
        first.actual_change_date = Some(date(2026, 11, 2));
        Schedule::new(
            vec![
                Aligner::new(4, date(2026, 12, 1)),
                first,
                Aligner::new(3, date(2026, 11, 15)),
            ],
            date(2026, 12, 1),
        )
    }

    #[test]
    fn test_new_sorts_by_id() {
        let ids: Vec<u32> = sample().aligners().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_position_and_get() {
        let schedule = sample();
        assert_eq!(schedule.position(3), Some(1));
        assert_eq!(schedule.get(4).map(|a| a.id), Some(4));
        assert_eq!(schedule.position(1), None);
        assert!(schedule.get(99).is_none());
    }

    #[test]
    fn test_current_aligner() {
        let schedule = sample();
        assert_eq!(schedule.current_index(), Some(1));
        assert_eq!(schedule.current().map(|a| a.id), Some(3));
        assert!(!schedule.is_complete());
    }

    #[test]
    fn test_complete_schedule_has_no_current() {
        let aligners = sample()
            .aligners()
            .iter()
            .cloned()
            .map(|mut a| {
                a.actual_change_date = Some(a.projected_change_date);
                a
            })
            .collect();
        let schedule = sample().with_aligners(aligners);
        assert!(schedule.is_complete());
        assert!(!schedule.is_behind(date(2030, 1, 1)));
    }

    #[test]
    fn test_is_behind() {
        let schedule = sample();
        assert!(!schedule.is_behind(date(2026, 11, 15)));
        assert!(schedule.is_behind(date(2026, 11, 16)));
    }

    #[test]
    fn test_contiguous_ids() {
        assert!(sample().has_contiguous_ids());

        let gapped = Schedule::new(
            vec![
                Aligner::new(1, date(2026, 11, 1)),
                Aligner::new(3, date(2026, 11, 2)),
            ],
            date(2026, 12, 1),
        );
        assert!(!gapped.has_contiguous_ids());

        let duplicated = Schedule::new(
            vec![
                Aligner::new(1, date(2026, 11, 1)),
                Aligner::new(1, date(2026, 11, 2)),
            ],
            date(2026, 12, 1),
        );
        assert!(!duplicated.has_contiguous_ids());
    }
}
