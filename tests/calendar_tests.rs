// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, Timelike};
use hisabkitab::Error;
use hisabkitab::calendar::{
    current_month, format_timestamp, month_key, parse_month, parse_timestamp,
};
use regex::Regex;

#[test]
fn month_key_is_zero_padded() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    assert_eq!(month_key(&ts), "2024-03");

    let dec = NaiveDate::from_ymd_opt(1999, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(month_key(&dec), "1999-12");
}

#[test]
fn month_key_always_matches_pattern() {
    let re = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
    let mut d = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    while d < end {
        let key = month_key(&d.and_hms_opt(12, 0, 0).unwrap());
        assert!(re.is_match(&key), "bad key {}", key);
        assert_eq!(key, format!("{:04}-{:02}", d.year(), d.month()));
        d = d.succ_opt().unwrap();
    }
    assert!(re.is_match(&current_month()));
}

#[test]
fn month_boundaries_stay_in_their_month() {
    let last = parse_timestamp("2024-03-31T23:59:59").unwrap();
    let first = parse_timestamp("2024-04-01T00:00:00").unwrap();
    assert_eq!(month_key(&last), "2024-03");
    assert_eq!(month_key(&first), "2024-04");
}

#[test]
fn parse_timestamp_accepts_dates_and_times() {
    let d = parse_timestamp("2024-03-01").unwrap();
    assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 3, 1, 0));

    let t = parse_timestamp(" 2024-03-01 10:30 ").unwrap();
    assert_eq!((t.hour(), t.minute()), (10, 30));

    let f = parse_timestamp("2024-03-01T10:30:15.250").unwrap();
    assert_eq!(f.second(), 15);

    // Offsets are converted to local time; the result is still a valid key.
    let z = parse_timestamp("2024-03-15T12:00:00.000Z").unwrap();
    assert!(month_key(&z).starts_with("2024-03"));
}

#[test]
fn parse_timestamp_rejects_garbage() {
    for bad in ["", "yesterday", "2024-13-01", "2024-02-30", "01/03/2024"] {
        match parse_timestamp(bad) {
            Err(Error::InvalidDate(s)) => assert_eq!(s, bad.trim()),
            other => panic!("expected InvalidDate for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn parse_month_validates_shape() {
    assert_eq!(parse_month("2024-03").unwrap(), "2024-03");
    assert_eq!(parse_month(" 2024-11 ").unwrap(), "2024-11");
    for bad in ["2024-3", "2024-00", "2024-13", "24-03", "2024/03", "2024-03-01", ""] {
        assert!(
            matches!(parse_month(bad), Err(Error::InvalidMonth(_))),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn format_timestamp_keeps_fractional_seconds() {
    let whole = parse_timestamp("2024-03-01T10:30:15").unwrap();
    assert_eq!(format_timestamp(&whole), "2024-03-01T10:30:15");

    let millis = parse_timestamp("2024-03-01T10:30:15.250").unwrap();
    assert_eq!(format_timestamp(&millis), "2024-03-01T10:30:15.250");

    let nanos = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_nano_opt(10, 30, 15, 123_456_789)
        .unwrap();
    let text = format_timestamp(&nanos);
    assert_eq!(text, "2024-03-01T10:30:15.123456789");
    assert_eq!(parse_timestamp(&text).unwrap(), nanos);
}
