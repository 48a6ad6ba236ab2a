use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use dialwindow_core::domain::CampaignDraft;
use dialwindow_core::rules::ValidationErrors;
use dialwindow_core::time::{parse_date, today_local};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(value) => parse_date(value).with_context(|| format!("parse --today {value}")),
        None => Ok(today_local()),
    }
}

pub fn parse_date_arg(flag: &str, raw: &str) -> Result<NaiveDate> {
    parse_date(raw).with_context(|| format!("parse {flag} {raw}"))
}

/// Reads JSON from a file, or from stdin when the path is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

pub fn read_draft(path: &Path) -> Result<CampaignDraft> {
    read_json(path)
}

pub fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        println!("  {field}: {message}");
    }
}
