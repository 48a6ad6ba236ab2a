//! Property tests for weekday derivation, clock conversion and step rules.

use chrono::{Datelike, Duration, NaiveDate};
use dialwindow_core::time::{one_year_after, to_12_hour, to_24_hour};
use dialwindow_core::{weekdays_in_range, CampaignDraft, FieldKey, Step, Validator, Weekday};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| base_date() + Duration::days(offset))
}

fn arb_window() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        Just(("09:00".to_string(), "17:00".to_string())),
        Just(("00:00".to_string(), "23:59".to_string())),
        Just(("10:00".to_string(), "09:00".to_string())),
        Just(("12:00".to_string(), "12:00".to_string())),
        Just(("9 AM".to_string(), "17:00".to_string())),
    ]
}

fn window_is_valid(window: &(String, String)) -> bool {
    match (window.0.as_str(), window.1.as_str()) {
        ("09:00", "17:00") | ("00:00", "23:59") => true,
        _ => false,
    }
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("Renewals".to_string()),
        Just(" Q3 win-back ".to_string()),
    ]
}

proptest! {
    #[test]
    fn week_or_longer_enables_every_day(start in arb_date(), extra in 6i64..400) {
        let end = start + Duration::days(extra);
        prop_assert!(weekdays_in_range(start, end).is_full());
    }

    #[test]
    fn short_span_matches_literal_walk(start in arb_date(), span in 0i64..6) {
        let end = start + Duration::days(span);
        let mut expected: Vec<u8> = (0..=span)
            .map(|offset| (start + Duration::days(offset)).weekday().num_days_from_sunday() as u8)
            .collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(weekdays_in_range(start, end).indices(), expected);
    }

    #[test]
    fn twenty_four_hour_round_trip(hour in 0u32..24, minute in 0u32..60) {
        let value = format!("{:02}:{:02}", hour, minute);
        prop_assert_eq!(to_24_hour(&to_12_hour(&value)), value);
    }

    #[test]
    fn details_step_is_clean_iff_fields_are_valid(
        name in arb_name(),
        caller in prop_oneof![Just(String::new()), Just("pn-1".to_string())],
        ivr in prop_oneof![Just(String::new()), Just("sales".to_string())],
        attempts in -3i32..15,
        concurrency in -3i32..110,
        retry in prop_oneof![
            Just("00:00:00".to_string()),
            Just("23:59:59".to_string()),
            Just("24:00:00".to_string()),
            Just("1:2:3".to_string()),
        ],
    ) {
        let mut draft = CampaignDraft::new("UTC");
        draft.name = name.clone();
        draft.caller_id = caller.clone();
        draft.ivr_profile = ivr.clone();
        draft.max_attempts = attempts;
        draft.concurrency_limit = concurrency;
        draft.retry_interval = retry.clone();

        let expected_clean = !name.trim().is_empty()
            && !caller.is_empty()
            && !ivr.is_empty()
            && (1..=10).contains(&attempts)
            && (1..=100).contains(&concurrency)
            && (retry == "00:00:00" || retry == "23:59:59");

        let validator = Validator::new(base_date());
        let errors = validator.validate_step(&draft, Step::Details);
        prop_assert_eq!(errors.is_empty(), expected_clean);
    }

    #[test]
    fn schedule_step_is_clean_iff_rules_hold(
        start_offset in proptest::option::of(-3i64..30),
        end_offset in proptest::option::of(-5i64..400),
        enabled_mask in 0u8..128,
        windows in proptest::collection::vec(arb_window(), 7),
    ) {
        let today = base_date() + Duration::days(9_000);
        let start = start_offset.map(|offset| today + Duration::days(offset));
        let end = match (start, end_offset) {
            (Some(start), Some(offset)) => Some(start + Duration::days(offset)),
            (None, Some(offset)) => Some(today + Duration::days(offset)),
            (_, None) => None,
        };

        let mut draft = CampaignDraft::new("UTC");
        draft.start_date = start;
        draft.end_date = end;
        for (index, day) in Weekday::ALL.into_iter().enumerate() {
            let schedule = draft.weekly_schedule.day_mut(day);
            schedule.enabled = enabled_mask & (1 << index) != 0;
            schedule.start_time = windows[index].0.clone();
            schedule.end_time = windows[index].1.clone();
        }

        let start_ok = start.is_some_and(|start| start >= today);
        let end_ok = match (start, end) {
            (Some(start), Some(end)) => end > start && end <= one_year_after(start),
            (None, Some(_)) => true,
            (_, None) => false,
        };
        let windows_ok = (0..7)
            .filter(|index| enabled_mask & (1 << index) != 0)
            .all(|index| window_is_valid(&windows[index]));
        let expected_clean = start_ok && end_ok && enabled_mask != 0 && windows_ok;

        let errors = Validator::new(today).validate_step(&draft, Step::Schedule);
        prop_assert_eq!(errors.is_empty(), expected_clean, "{:?}", errors);
    }

    #[test]
    fn leap_day_start_ends_on_march_first(cycle in 0i32..25) {
        let year = 2000 + cycle * 4;
        let start = NaiveDate::from_ymd_opt(year, 2, 29).unwrap();
        let validator = Validator::new(base_date());
        let mut draft = CampaignDraft::new("UTC");
        draft.start_date = Some(start);

        draft.end_date = NaiveDate::from_ymd_opt(year + 1, 3, 1);
        prop_assert!(!validator
            .validate_step(&draft, Step::Schedule)
            .contains(FieldKey::EndDate));

        draft.end_date = NaiveDate::from_ymd_opt(year + 1, 3, 2);
        prop_assert!(validator
            .validate_step(&draft, Step::Schedule)
            .contains(FieldKey::EndDate));
    }
}
