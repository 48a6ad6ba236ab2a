use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Args;
use dialwindow_core::clock::{snapshot, ClockTicker, ZoneClock, DEFAULT_REFRESH};
use dialwindow_core::domain::TimezoneOption;
use std::sync::mpsc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ClocksArgs {
    /// Restrict output to these zone ids
    #[arg(long = "zone", value_name = "ID")]
    pub zones: Vec<String>,
    /// Keep refreshing until interrupted
    #[arg(long)]
    pub watch: bool,
    /// Stop watching after this many refreshes
    #[arg(long, requires = "watch", value_parser = clap::value_parser!(u64).range(1..))]
    pub ticks: Option<u64>,
    #[arg(long, hide = true, requires = "watch")]
    pub interval_ms: Option<u64>,
}

pub fn show_clocks(ctx: &Context<'_>, args: ClocksArgs) -> Result<()> {
    let zones = select_zones(&ctx.config.reference.timezones, &args.zones)?;

    if !args.watch {
        return print_clocks(ctx, &snapshot(&zones, Utc::now()));
    }

    let interval = args
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REFRESH);
    let (tx, rx) = mpsc::channel();
    let ticker = ClockTicker::start(interval, zones, move |clocks| {
        let _ = tx.send(clocks);
    })
    .with_context(|| "start clock refresh")?;

    let mut seen = 0u64;
    while let Ok(clocks) = rx.recv() {
        print_clocks(ctx, &clocks)?;
        seen += 1;
        if args.ticks.is_some_and(|limit| seen >= limit) {
            break;
        }
    }
    debug!(ticks = seen, "clock watch finished");
    ticker.stop();
    Ok(())
}

fn select_zones(all: &[TimezoneOption], wanted: &[String]) -> Result<Vec<TimezoneOption>> {
    if wanted.is_empty() {
        return Ok(all.to_vec());
    }
    wanted
        .iter()
        .map(|id| {
            all.iter()
                .find(|zone| zone.id == *id)
                .cloned()
                .ok_or_else(|| not_found(format!("timezone {id}")))
        })
        .collect()
}

fn print_clocks(ctx: &Context<'_>, clocks: &[ZoneClock]) -> Result<()> {
    if ctx.json {
        return print_json(&clocks);
    }
    for clock in clocks {
        println!("{:>8}  {}  ({})", clock.time, clock.label, clock.id);
    }
    Ok(())
}
