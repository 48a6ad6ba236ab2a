pub mod draft;
pub mod reference;
pub mod schedule;
pub mod weekday;

pub use draft::{
    CampaignDraft, CampaignSubmission, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RETRY_INTERVAL,
};
pub use reference::{
    default_timezones, PhoneNumber, PhoneNumberStatus, ReferenceData, TimezoneOption,
};
pub use schedule::{DaySchedule, WeeklySchedule, DEFAULT_WINDOW_END, DEFAULT_WINDOW_START};
pub use weekday::Weekday;
