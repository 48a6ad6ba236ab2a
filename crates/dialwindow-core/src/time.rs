use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, Timelike, Utc};
use std::env;
use thiserror::Error;

pub const FALLBACK_TIMEZONE: &str = "UTC";

/// Half-hour slots offered by the time picker.
pub const COMMON_TIMES: [&str; 48] = [
    "12:00 AM", "12:30 AM", "1:00 AM", "1:30 AM", "2:00 AM", "2:30 AM", "3:00 AM", "3:30 AM",
    "4:00 AM", "4:30 AM", "5:00 AM", "5:30 AM", "6:00 AM", "6:30 AM", "7:00 AM", "7:30 AM",
    "8:00 AM", "8:30 AM", "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM",
    "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM", "7:00 PM", "7:30 PM",
    "8:00 PM", "8:30 PM", "9:00 PM", "9:30 PM", "10:00 PM", "10:30 PM", "11:00 PM", "11:30 PM",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("value cannot be empty")]
    Empty,
    #[error("invalid date format: expected YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("invalid time format: expected HH:MM")]
    InvalidTimeFormat,
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Same month and day one year later. A Feb 29 start rolls over to Mar 1.
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn one_year_from_today() -> NaiveDate {
    one_year_after(today_local())
}

/// Zone id of the running process, taken from `TZ`.
pub fn local_timezone_name() -> String {
    env::var("TZ")
        .ok()
        .map(|value| value.trim().trim_start_matches(':').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
}

pub fn parse_date(input: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    if trimmed.len() != 10 {
        return Err(TimeParseError::InvalidDateFormat);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| TimeParseError::InvalidDateFormat)
}

/// Strict two-digit `HH:MM`.
pub fn parse_hh_mm(input: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    let bytes = trimmed.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, byte)| idx == 2 || byte.is_ascii_digit());
    if !shape_ok {
        return Err(TimeParseError::InvalidTimeFormat);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| TimeParseError::InvalidTimeFormat)
}

/// `"13:05"` becomes `"1:05 PM"`. Unparseable input is returned as is.
pub fn to_12_hour(time: &str) -> String {
    match parse_hh_mm(time) {
        Ok(parsed) => format_12_hour(parsed),
        Err(_) => time.to_string(),
    }
}

/// `"1:05 PM"` becomes `"13:05"`. Unparseable input is returned as is.
pub fn to_24_hour(time: &str) -> String {
    match parse_12_hour(time) {
        Some(parsed) => parsed.format("%H:%M").to_string(),
        None => time.to_string(),
    }
}

pub fn zone_time(now: DateTime<Utc>, offset: FixedOffset) -> String {
    format_12_hour(now.with_timezone(&offset).time())
}

fn format_12_hour(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    let meridiem = if pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, time.minute(), meridiem)
}

fn parse_12_hour(input: &str) -> Option<NaiveTime> {
    let (clock, meridiem) = input.trim().split_once(' ')?;
    let (hour, minute) = clock.split_once(':')?;
    let digits = |value: &str| value.bytes().all(|byte| byte.is_ascii_digit());
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" => false,
        "PM" => true,
        _ => return None,
    };
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, false) => hour,
        (hour, true) => hour + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
