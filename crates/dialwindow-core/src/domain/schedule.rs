use crate::domain::weekday::Weekday;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_START: &str = "09:00";
pub const DEFAULT_WINDOW_END: &str = "17:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
}

impl DaySchedule {
    pub fn disabled(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            enabled: false,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::disabled(DEFAULT_WINDOW_START, DEFAULT_WINDOW_END)
    }
}

/// Call window per weekday. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeeklySchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeeklySchedule {
    /// Every day disabled with the same window.
    pub fn uniform(start_time: &str, end_time: &str) -> Self {
        let day = DaySchedule::disabled(start_time, end_time);
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day.clone(),
            saturday: day.clone(),
            sunday: day,
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    pub fn enabled_days(&self) -> Vec<Weekday> {
        self.iter()
            .filter(|(_, schedule)| schedule.enabled)
            .map(|(day, _)| day)
            .collect()
    }

    pub fn any_enabled(&self) -> bool {
        self.iter().any(|(_, schedule)| schedule.enabled)
    }
}
