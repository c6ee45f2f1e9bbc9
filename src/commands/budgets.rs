// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::current_month;
use crate::ledger::Ledger;
use crate::store::RecordStore;
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let budget = ledger.set_budget(
                arg(sub, "month")?,
                parse_decimal(arg(sub, "starting-balance")?)?,
                parse_decimal(arg(sub, "salary")?)?,
            )?;
            println!(
                "Budget for {}: starting balance {}, salary {}",
                budget.month, budget.starting_balance, budget.salary
            );
        }
        Some(("show", sub)) => {
            let month = opt_arg(sub, "month")
                .map(str::to_string)
                .unwrap_or_else(current_month);
            let budget = ledger.budget(&month)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget)? {
                return Ok(());
            }
            match budget {
                Some(b) => {
                    let ccy = ledger.settings()?.currency;
                    let rows = vec![
                        vec!["starting balance".into(), fmt_money(&b.starting_balance, &ccy)],
                        vec!["salary".into(), fmt_money(&b.salary, &ccy)],
                    ];
                    println!("{}", pretty_table(&[b.month.as_str(), "Amount"], rows));
                }
                None => println!("No budget set for {}", month),
            }
        }
        _ => {}
    }
    Ok(())
}
