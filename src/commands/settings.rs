// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{Settings, SettingsPatch};
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, opt_arg, pretty_table};
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = ledger.settings()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                print_settings(&s);
            }
        }
        Some(("set", sub)) => {
            let pin = if sub.get_flag("clear-pin") {
                Some(None)
            } else {
                opt_arg(sub, "pin").map(|p| Some(p.to_string()))
            };
            let patch = SettingsPatch {
                language: opt_arg(sub, "language").map(str::parse).transpose()?,
                currency: opt_arg(sub, "currency").map(str::to_string),
                pin_enabled: sub.get_one::<bool>("pin-enabled").copied(),
                pin,
                notifications_enabled: sub.get_one::<bool>("notifications").copied(),
                last_notification_date: None,
            };
            let s = ledger.update_settings(patch)?;
            print_settings(&s);
        }
        _ => {}
    }
    Ok(())
}

fn print_settings(s: &Settings) {
    let rows = vec![
        vec!["language".into(), s.language.to_string()],
        vec!["currency".into(), s.currency.clone()],
        vec!["pin enabled".into(), s.pin_enabled.to_string()],
        vec![
            "pin".into(),
            if s.pin.is_some() { "****".into() } else { "-".into() },
        ],
        vec!["notifications".into(), s.notifications_enabled.to_string()],
        vec![
            "last notification".into(),
            s.last_notification_date.clone().unwrap_or_else(|| "-".into()),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}
