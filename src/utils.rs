// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::calendar;

/// A required string argument, trimmed.
pub fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    sub.get_one::<String>(id)
        .map(|s| s.trim())
        .with_context(|| format!("Missing required argument --{}", id))
}

pub fn opt_arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    sub.get_one::<String>(id).map(|s| s.trim())
}

pub fn id_arg(sub: &clap::ArgMatches, id: &str) -> Result<i64> {
    sub.get_one::<i64>(id)
        .copied()
        .with_context(|| format!("Missing required argument --{}", id))
}

pub fn parse_date(s: &str) -> Result<NaiveDateTime> {
    Ok(calendar::parse_timestamp(s)?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_date(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
