// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month keys and timestamp parsing.
//!
//! Records carry their timestamp as a local wall-clock [`NaiveDateTime`], so
//! the month key is simply the calendar year and month of that value. Input
//! with an explicit offset (RFC 3339) is converted to local time first.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("month pattern is a valid regex")
});

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Canonical `YYYY-MM` key for a local timestamp.
pub fn month_key(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

pub fn current_month() -> String {
    month_key(&now())
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Validate a `YYYY-MM` month key and return it trimmed.
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    if MONTH_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(Error::InvalidMonth(s.to_string()))
    }
}

/// Parse a date or timestamp into local wall-clock time.
///
/// Accepts `YYYY-MM-DD` (midnight), naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// and RFC 3339 strings with an offset.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ts) = d.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Whole seconds print without a fraction; sub-second values keep
/// millisecond, microsecond or nanosecond precision.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Serde adapter for required timestamps in records and snapshots.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for optional timestamps (`dueDate`).
pub mod timestamp_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(ts: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_some(&super::format_timestamp(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_timestamp(s).map(Some).map_err(de::Error::custom),
        }
    }
}
