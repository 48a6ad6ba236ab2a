use anyhow::Result;
use chrono::NaiveDate;
use dialwindow_config::AppConfig;
use serde::Serialize;
use std::io::{self, Write};

pub mod clocks;
pub mod completions;
pub mod derive;
pub mod draft;
pub mod replay;
pub mod time;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub json: bool,
    pub today: NaiveDate,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
