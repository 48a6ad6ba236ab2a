use crate::domain::{CampaignDraft, PhoneNumber, ReferenceData, Weekday};
use crate::error::CoreError;
use crate::time::{one_year_after, parse_hh_mm};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const MIN_ATTEMPTS: i32 = 1;
pub const MAX_ATTEMPTS: i32 = 10;
pub const MIN_CONCURRENCY: i32 = 1;
pub const MAX_CONCURRENCY: i32 = 100;

pub const MSG_NAME_REQUIRED: &str = "Campaign name is required";
pub const MSG_PHONE_REQUIRED: &str = "Phone number is required";
pub const MSG_PHONE_UNKNOWN: &str = "Unknown phone number";
pub const MSG_IVR_REQUIRED: &str = "IVR profile is required";
pub const MSG_IVR_UNKNOWN: &str = "Unknown IVR profile";
pub const MSG_ATTEMPTS_RANGE: &str = "Max attempts must be between 1 and 10";
pub const MSG_CONCURRENCY_RANGE: &str = "Concurrency limit must be between 1 and 100";
pub const MSG_RETRY_FORMAT: &str = "Retry interval must be in HH:MM:SS format";
pub const MSG_START_REQUIRED: &str = "Start date is required";
pub const MSG_START_PAST: &str = "Start date cannot be in the past";
pub const MSG_END_REQUIRED: &str = "End date is required";
pub const MSG_END_BEFORE_START: &str = "End date must be after start date";
pub const MSG_END_TOO_FAR: &str = "End date cannot exceed 1 year from start date";
pub const MSG_NO_DAYS: &str = "At least one day must be enabled";
pub const MSG_WINDOW_ORDER: &str = "Start time must be before end time";
pub const MSG_WINDOW_FORMAT: &str = "Times must be in HH:MM format";

static RETRY_INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$").expect("retry interval pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Details,
    Schedule,
}

impl Step {
    pub const ALL: [Step; 2] = [Step::Details, Step::Schedule];

    pub fn number(self) -> u8 {
        match self {
            Step::Details => 1,
            Step::Schedule => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Details => "Campaign details",
            Step::Schedule => "Schedule",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Details => Some(Step::Schedule),
            Step::Schedule => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Details => None,
            Step::Schedule => Some(Step::Details),
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Step::Details),
            2 => Ok(Step::Schedule),
            other => Err(CoreError::InvalidStep(other.to_string())),
        }
    }
}

impl FromStr for Step {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "details" => Ok(Step::Details),
            "2" | "schedule" => Ok(Step::Schedule),
            _ => Err(CoreError::InvalidStep(raw.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Key of a validation message. Per-day window errors are namespaced by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Name,
    PhoneNumber,
    Ivr,
    MaxAttempts,
    ConcurrencyLimit,
    RetryInterval,
    StartDate,
    EndDate,
    Schedule,
    Day(Weekday),
}

impl FieldKey {
    pub fn step(self) -> Step {
        match self {
            FieldKey::Name
            | FieldKey::PhoneNumber
            | FieldKey::Ivr
            | FieldKey::MaxAttempts
            | FieldKey::ConcurrencyLimit
            | FieldKey::RetryInterval => Step::Details,
            FieldKey::StartDate | FieldKey::EndDate | FieldKey::Schedule | FieldKey::Day(_) => {
                Step::Schedule
            }
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Name => f.write_str("name"),
            FieldKey::PhoneNumber => f.write_str("phoneNumber"),
            FieldKey::Ivr => f.write_str("ivr"),
            FieldKey::MaxAttempts => f.write_str("maxAttempts"),
            FieldKey::ConcurrencyLimit => f.write_str("concurrencyLimit"),
            FieldKey::RetryInterval => f.write_str("retryInterval"),
            FieldKey::StartDate => f.write_str("startDate"),
            FieldKey::EndDate => f.write_str("endDate"),
            FieldKey::Schedule => f.write_str("schedule"),
            FieldKey::Day(day) => write!(f, "schedule-{}", day),
        }
    }
}

impl FromStr for FieldKey {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if let Some(day) = value.strip_prefix("schedule-") {
            return day
                .parse::<Weekday>()
                .map(FieldKey::Day)
                .map_err(|_| CoreError::InvalidField(raw.to_string()));
        }
        match value {
            "name" => Ok(FieldKey::Name),
            "phoneNumber" => Ok(FieldKey::PhoneNumber),
            "ivr" => Ok(FieldKey::Ivr),
            "maxAttempts" => Ok(FieldKey::MaxAttempts),
            "concurrencyLimit" => Ok(FieldKey::ConcurrencyLimit),
            "retryInterval" => Ok(FieldKey::RetryInterval),
            "startDate" => Ok(FieldKey::StartDate),
            "endDate" => Ok(FieldKey::EndDate),
            "schedule" => Ok(FieldKey::Schedule),
            _ => Err(CoreError::InvalidField(raw.to_string())),
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field key to message. Each field carries at most one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldKey, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldKey, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: FieldKey) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> Vec<FieldKey> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        self.0.iter().map(|(key, message)| (*key, message.as_str()))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (FieldKey, String);
    type IntoIter = btree_map::IntoIter<FieldKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Runs the field rules against a draft.
///
/// Every rule for the requested scope runs; nothing short-circuits. Empty
/// allow-lists leave the IVR profile and caller id checked for presence only.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    today: NaiveDate,
    ivr_profiles: &'a [String],
    phone_numbers: &'a [PhoneNumber],
}

impl<'a> Validator<'a> {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ivr_profiles: &[],
            phone_numbers: &[],
        }
    }

    pub fn with_reference(mut self, reference: &'a ReferenceData) -> Self {
        self.ivr_profiles = &reference.ivr_profiles;
        self.phone_numbers = &reference.phone_numbers;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn validate_step(&self, draft: &CampaignDraft, step: Step) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            Step::Details => self.check_details(draft, &mut errors),
            Step::Schedule => self.check_schedule(draft, &mut errors),
        }
        errors
    }

    /// Union of every step's errors.
    pub fn validate_all(&self, draft: &CampaignDraft) -> ValidationErrors {
        Step::ALL
            .into_iter()
            .flat_map(|step| self.validate_step(draft, step))
            .fold(ValidationErrors::new(), |mut errors, (field, message)| {
                errors.insert(field, message);
                errors
            })
    }

    fn check_details(&self, draft: &CampaignDraft, errors: &mut ValidationErrors) {
        if draft.name.trim().is_empty() {
            errors.insert(FieldKey::Name, MSG_NAME_REQUIRED);
        }

        let caller_id = draft.caller_id.trim();
        if caller_id.is_empty() {
            errors.insert(FieldKey::PhoneNumber, MSG_PHONE_REQUIRED);
        } else if !self.phone_numbers.is_empty()
            && !self.phone_numbers.iter().any(|phone| phone.id == caller_id)
        {
            errors.insert(FieldKey::PhoneNumber, MSG_PHONE_UNKNOWN);
        }

        let ivr = draft.ivr_profile.trim();
        if ivr.is_empty() {
            errors.insert(FieldKey::Ivr, MSG_IVR_REQUIRED);
        } else if !self.ivr_profiles.is_empty()
            && !self.ivr_profiles.iter().any(|profile| profile == ivr)
        {
            errors.insert(FieldKey::Ivr, MSG_IVR_UNKNOWN);
        }

        if !(MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&draft.max_attempts) {
            errors.insert(FieldKey::MaxAttempts, MSG_ATTEMPTS_RANGE);
        }
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&draft.concurrency_limit) {
            errors.insert(FieldKey::ConcurrencyLimit, MSG_CONCURRENCY_RANGE);
        }
        if !is_valid_retry_interval(&draft.retry_interval) {
            errors.insert(FieldKey::RetryInterval, MSG_RETRY_FORMAT);
        }
    }

    fn check_schedule(&self, draft: &CampaignDraft, errors: &mut ValidationErrors) {
        match draft.start_date {
            None => errors.insert(FieldKey::StartDate, MSG_START_REQUIRED),
            Some(start) if start < self.today => errors.insert(FieldKey::StartDate, MSG_START_PAST),
            Some(_) => {}
        }

        match (draft.start_date, draft.end_date) {
            (_, None) => errors.insert(FieldKey::EndDate, MSG_END_REQUIRED),
            (Some(start), Some(end)) if end <= start => {
                errors.insert(FieldKey::EndDate, MSG_END_BEFORE_START)
            }
            (Some(start), Some(end)) if end > one_year_after(start) => {
                errors.insert(FieldKey::EndDate, MSG_END_TOO_FAR)
            }
            _ => {}
        }

        if !draft.weekly_schedule.any_enabled() {
            errors.insert(FieldKey::Schedule, MSG_NO_DAYS);
        }

        for (day, window) in draft.weekly_schedule.iter() {
            if !window.enabled {
                continue;
            }
            match (parse_hh_mm(&window.start_time), parse_hh_mm(&window.end_time)) {
                (Ok(start), Ok(end)) if start >= end => {
                    errors.insert(FieldKey::Day(day), MSG_WINDOW_ORDER)
                }
                (Ok(_), Ok(_)) => {}
                _ => errors.insert(FieldKey::Day(day), MSG_WINDOW_FORMAT),
            }
        }
    }
}

pub fn is_valid_retry_interval(value: &str) -> bool {
    RETRY_INTERVAL.is_match(value)
}
