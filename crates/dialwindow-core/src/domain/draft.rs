use crate::domain::reference::ReferenceData;
use crate::domain::schedule::WeeklySchedule;
use crate::time::local_timezone_name;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ATTEMPTS: i32 = 1;
pub const DEFAULT_CONCURRENCY_LIMIT: i32 = 1;
pub const DEFAULT_RETRY_INTERVAL: &str = "00:00:00";

/// Campaign record under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignDraft {
    pub name: String,
    pub ivr_profile: String,
    pub caller_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub timezone: String,
    pub weekly_schedule: WeeklySchedule,
    pub max_attempts: i32,
    pub retry_interval: String,
    pub concurrency_limit: i32,
}

impl CampaignDraft {
    /// Strips surrounding whitespace from the reference ids, the form the
    /// allow-lists are checked in.
    pub fn normalize_ids(&mut self) {
        trim_in_place(&mut self.caller_id);
        trim_in_place(&mut self.ivr_profile);
    }

    pub fn new(timezone: impl Into<String>) -> Self {
        Self::with_schedule(timezone, WeeklySchedule::default())
    }

    pub fn with_schedule(timezone: impl Into<String>, weekly_schedule: WeeklySchedule) -> Self {
        Self {
            name: String::new(),
            ivr_profile: String::new(),
            caller_id: String::new(),
            start_date: None,
            end_date: None,
            timezone: timezone.into(),
            weekly_schedule,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_interval: DEFAULT_RETRY_INTERVAL.to_string(),
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self::new(local_timezone_name())
    }
}

/// Completed draft handed to the completion handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSubmission {
    #[serde(flatten)]
    pub campaign: CampaignDraft,
    pub caller_number: Option<String>,
}

impl CampaignSubmission {
    pub fn resolve(mut campaign: CampaignDraft, reference: &ReferenceData) -> Self {
        campaign.normalize_ids();
        let caller_number = reference
            .phone_number(&campaign.caller_id)
            .map(|phone| phone.number.clone());
        Self {
            campaign,
            caller_number,
        }
    }
}
