use crate::domain::{WeeklySchedule, Weekday};
use chrono::{Datelike, NaiveDate};

/// Set of weekdays keyed by their Sunday-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const FULL: u8 = 0b111_1111;

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self(Self::FULL)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        self.0 == Self::FULL
    }

    /// Members in Monday-first order.
    pub fn days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.contains(*day))
            .collect()
    }

    /// Member indices ascending, Sunday = 0.
    pub fn indices(&self) -> Vec<u8> {
        (0..7).filter(|idx| self.0 & (1 << idx) != 0).collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Weekdays that occur at least once in `[start, end]`.
///
/// The walk stops as soon as all seven are seen, so long or invalid spans
/// cost at most a week of iterations. `end < start` yields the empty set.
pub fn weekdays_in_range(start: NaiveDate, end: NaiveDate) -> WeekdaySet {
    let mut seen = WeekdaySet::empty();
    for date in start.iter_days().take_while(|date| *date <= end) {
        seen.insert(Weekday::from(date.weekday()));
        if seen.is_full() {
            break;
        }
    }
    seen
}

/// Forces each day's `enabled` flag to match the date range.
///
/// Only runs when both ends are set; returns whether the schedule was touched.
/// Window times are never modified.
pub fn sync_enabled_days(
    schedule: &mut WeeklySchedule,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return false;
    };
    let reachable = weekdays_in_range(start, end);
    for day in Weekday::ALL {
        schedule.day_mut(day).enabled = reachable.contains(day);
    }
    true
}
