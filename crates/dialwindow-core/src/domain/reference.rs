use crate::error::CoreError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhoneNumberStatus {
    #[default]
    Active,
    Inactive,
}

impl PhoneNumberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneNumberStatus::Active => "active",
            PhoneNumberStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for PhoneNumberStatus {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(PhoneNumberStatus::Active),
            "inactive" => Ok(PhoneNumberStatus::Inactive),
            _ => Err(CoreError::InvalidPhoneNumberStatus(raw.to_string())),
        }
    }
}

/// A caller id the campaign can dial from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub status: PhoneNumberStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneOption {
    pub id: String,
    pub label: String,
    /// Display offset from UTC. Daylight saving is not tracked.
    pub utc_offset_minutes: i32,
}

impl TimezoneOption {
    pub fn new(id: &str, label: &str, utc_offset_minutes: i32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            utc_offset_minutes,
        }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}

pub fn default_timezones() -> Vec<TimezoneOption> {
    vec![
        TimezoneOption::new("America/New_York", "Eastern Time (ET)", -300),
        TimezoneOption::new("America/Chicago", "Central Time (CT)", -360),
        TimezoneOption::new("America/Denver", "Mountain Time (MT)", -420),
        TimezoneOption::new("America/Phoenix", "Arizona (MST)", -420),
        TimezoneOption::new("America/Los_Angeles", "Pacific Time (PT)", -480),
        TimezoneOption::new("America/Anchorage", "Alaska Time (AKT)", -540),
        TimezoneOption::new("Pacific/Honolulu", "Hawaii Time (HT)", -600),
        TimezoneOption::new("UTC", "Coordinated Universal Time (UTC)", 0),
        TimezoneOption::new("Europe/London", "London (GMT)", 0),
        TimezoneOption::new("Europe/Berlin", "Central European Time (CET)", 60),
        TimezoneOption::new("Asia/Kolkata", "India Standard Time (IST)", 330),
        TimezoneOption::new("Asia/Tokyo", "Japan Standard Time (JST)", 540),
        TimezoneOption::new("Australia/Sydney", "Australian Eastern Time (AET)", 600),
    ]
}

/// Selectable values supplied from outside the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub phone_numbers: Vec<PhoneNumber>,
    pub ivr_profiles: Vec<String>,
    pub timezones: Vec<TimezoneOption>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            phone_numbers: Vec::new(),
            ivr_profiles: Vec::new(),
            timezones: default_timezones(),
        }
    }
}

impl ReferenceData {
    pub fn phone_number(&self, id: &str) -> Option<&PhoneNumber> {
        self.phone_numbers.iter().find(|phone| phone.id == id)
    }

    pub fn timezone(&self, id: &str) -> Option<&TimezoneOption> {
        self.timezones.iter().find(|zone| zone.id == id)
    }

    pub fn caller_ids(&self) -> Vec<String> {
        self.phone_numbers
            .iter()
            .map(|phone| phone.id.clone())
            .collect()
    }
}
