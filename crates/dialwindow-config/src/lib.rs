use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dialwindow_core::domain::{
    PhoneNumber, PhoneNumberStatus, ReferenceData, TimezoneOption,
};
use dialwindow_core::time::parse_hh_mm;
use dialwindow_core::FormDefaults;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "dialwindow";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub reference: ReferenceData,
    pub defaults: FormDefaults,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid caller_ids entry {index}: {field} is required")]
    InvalidCallerIdField { index: usize, field: &'static str },
    #[error("duplicate caller id: {0}")]
    DuplicateCallerId(String),
    #[error("invalid ivr profile at index {0}: value is empty")]
    InvalidIvrProfile(usize),
    #[error("duplicate ivr profile: {0}")]
    DuplicateIvrProfile(String),
    #[error("invalid timezones entry {index}: {field} is required")]
    InvalidTimezoneField { index: usize, field: &'static str },
    #[error("invalid utc offset for timezone {id}: {minutes} minutes")]
    InvalidTimezoneOffset { id: String, minutes: i32 },
    #[error("duplicate timezone: {0}")]
    DuplicateTimezone(String),
    #[error("timezones list cannot be empty")]
    EmptyTimezones,
    #[error("default_timezone is not a supported timezone: {0}")]
    UnknownDefaultTimezone(String),
    #[error("invalid schedule time: {0} (expected HH:MM)")]
    InvalidScheduleTime(String),
    #[error("invalid schedule window: {start} must be before {end}")]
    InvalidScheduleWindow { start: String, end: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_timezone: Option<String>,
    ivr_profiles: Option<Vec<String>>,
    caller_ids: Option<Vec<CallerIdFile>>,
    timezones: Option<Vec<TimezoneFile>>,
    schedule: Option<ScheduleFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CallerIdFile {
    id: Option<String>,
    number: Option<String>,
    status: Option<PhoneNumberStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimezoneFile {
    id: Option<String>,
    label: Option<String>,
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleFile {
    default_start_time: Option<String>,
    default_end_time: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(profiles) = parsed.ivr_profiles {
        config.reference.ivr_profiles = parse_ivr_profiles(profiles)?;
    }
    if let Some(caller_ids) = parsed.caller_ids {
        config.reference.phone_numbers = parse_caller_ids(caller_ids)?;
    }
    if let Some(timezones) = parsed.timezones {
        config.reference.timezones = parse_timezones(timezones)?;
    }

    if let Some(zone) = parsed.default_timezone {
        let zone = zone.trim();
        if config.reference.timezone(zone).is_none() {
            return Err(ConfigError::UnknownDefaultTimezone(zone.to_string()));
        }
        config.defaults.timezone = zone.to_string();
    }

    if let Some(schedule) = parsed.schedule {
        if let Some(start) = schedule.default_start_time {
            config.defaults.window_start = normalize_time(&start)?;
        }
        if let Some(end) = schedule.default_end_time {
            config.defaults.window_end = normalize_time(&end)?;
        }
        if config.defaults.window_start >= config.defaults.window_end {
            return Err(ConfigError::InvalidScheduleWindow {
                start: config.defaults.window_start.clone(),
                end: config.defaults.window_end.clone(),
            });
        }
    }

    Ok(config)
}

fn parse_ivr_profiles(raw: Vec<String>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidIvrProfile(index));
        }
        if !seen.insert(trimmed.to_string()) {
            return Err(ConfigError::DuplicateIvrProfile(trimmed.to_string()));
        }
        profiles.push(trimmed.to_string());
    }
    Ok(profiles)
}

fn parse_caller_ids(raw: Vec<CallerIdFile>) -> Result<Vec<PhoneNumber>> {
    let mut seen = HashSet::new();
    let mut numbers = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let id = required_field(entry.id, || ConfigError::InvalidCallerIdField {
            index,
            field: "id",
        })?;
        let number = required_field(entry.number, || ConfigError::InvalidCallerIdField {
            index,
            field: "number",
        })?;
        if !seen.insert(id.clone()) {
            return Err(ConfigError::DuplicateCallerId(id));
        }
        numbers.push(PhoneNumber {
            id,
            number,
            status: entry.status.unwrap_or_default(),
        });
    }
    Ok(numbers)
}

fn parse_timezones(raw: Vec<TimezoneFile>) -> Result<Vec<TimezoneOption>> {
    if raw.is_empty() {
        return Err(ConfigError::EmptyTimezones);
    }
    let mut seen = HashSet::new();
    let mut zones = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let id = required_field(entry.id, || ConfigError::InvalidTimezoneField {
            index,
            field: "id",
        })?;
        let label = match entry.label {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => id.clone(),
        };
        let minutes = entry
            .utc_offset_minutes
            .ok_or(ConfigError::InvalidTimezoneField {
                index,
                field: "utc_offset_minutes",
            })?;
        let zone = TimezoneOption {
            id: id.clone(),
            label,
            utc_offset_minutes: minutes,
        };
        if zone.offset().is_none() {
            return Err(ConfigError::InvalidTimezoneOffset { id, minutes });
        }
        if !seen.insert(id.clone()) {
            return Err(ConfigError::DuplicateTimezone(id));
        }
        zones.push(zone);
    }
    Ok(zones)
}

fn required_field(
    value: Option<String>,
    missing: impl FnOnce() -> ConfigError,
) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(missing()),
    }
}

fn normalize_time(raw: &str) -> Result<String> {
    parse_hh_mm(raw)
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| ConfigError::InvalidScheduleTime(raw.to_string()))
}
