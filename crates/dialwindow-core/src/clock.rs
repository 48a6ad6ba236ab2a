//! Per-zone wall clocks for display. Nothing here touches the draft.

use crate::domain::TimezoneOption;
use crate::time::zone_time;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneClock {
    pub id: String,
    pub label: String,
    pub time: String,
}

/// Current time in every zone. Zones with an unusable offset are skipped.
pub fn snapshot(zones: &[TimezoneOption], now: DateTime<Utc>) -> Vec<ZoneClock> {
    zones
        .iter()
        .filter_map(|zone| {
            let offset = zone.offset()?;
            Some(ZoneClock {
                id: zone.id.clone(),
                label: zone.label.clone(),
                time: zone_time(now, offset),
            })
        })
        .collect()
}

/// Background refresh of zone clocks.
///
/// Emits immediately, then once per interval until stopped or dropped.
pub struct ClockTicker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ClockTicker {
    pub fn start<F>(interval: Duration, zones: Vec<TimezoneOption>, mut on_tick: F) -> io::Result<Self>
    where
        F: FnMut(Vec<ZoneClock>) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("zone-clock".to_string())
            .spawn(move || loop {
                on_tick(snapshot(&zones, Utc::now()));
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::{snapshot, ClockTicker};
    use crate::domain::{default_timezones, TimezoneOption};
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn snapshot_formats_each_zone() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 16, 0, 0).unwrap();
        let zones = vec![
            TimezoneOption::new("UTC", "UTC", 0),
            TimezoneOption::new("America/Chicago", "Central", -360),
            TimezoneOption::new("Broken", "Broken", 100_000),
        ];
        let clocks = snapshot(&zones, now);
        assert_eq!(clocks.len(), 2);
        assert_eq!(clocks[0].time, "4:00 PM");
        assert_eq!(clocks[1].time, "10:00 AM");
    }

    #[test]
    fn ticker_emits_until_stopped() {
        let ticks = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&ticks);
        let ticker = ClockTicker::start(Duration::from_millis(5), default_timezones(), move |clocks| {
            assert!(!clocks.is_empty());
            *counter.lock().unwrap() += 1;
        })
        .expect("start ticker");

        thread::sleep(Duration::from_millis(40));
        ticker.stop();
        let after_stop = *ticks.lock().unwrap();
        assert!(after_stop >= 1);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(*ticks.lock().unwrap(), after_stop);
    }
}
