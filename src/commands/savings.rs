// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar;
use crate::ledger::Ledger;
use crate::models::NewSaving;
use crate::store::RecordStore;
use crate::utils::{
    arg, fmt_date, id_arg, maybe_print_json, opt_arg, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let date = match opt_arg(sub, "date") {
                Some(d) => parse_date(d)?,
                None => calendar::now(),
            };
            let saving = ledger.create_saving(NewSaving {
                purpose: arg(sub, "purpose")?.to_string(),
                amount: parse_decimal(arg(sub, "amount")?)?,
                date,
                note: opt_arg(sub, "note").map(str::to_string),
            })?;
            println!(
                "Saved {} for '{}' (id {}, month {})",
                saving.amount, saving.purpose, saving.id, saving.month
            );
        }
        Some(("list", sub)) => {
            let savings = ledger.list_savings(opt_arg(sub, "month"))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &savings)? {
                let rows = savings
                    .iter()
                    .map(|s| {
                        vec![
                            s.id.to_string(),
                            fmt_date(&s.date),
                            s.purpose.clone(),
                            s.amount.to_string(),
                            s.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Date", "Purpose", "Amount", "Note"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub, "id")?;
            ledger.delete_saving(id)?;
            println!("Removed saving {}", id);
        }
        _ => {}
    }
    Ok(())
}
