// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::current_month;
use crate::ledger::Ledger;
use crate::models::EntryType;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, opt_arg, pretty_table};
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(ledger, sub)?,
        Some(("months", sub)) => {
            let months = ledger.months()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
                let rows = months.into_iter().map(|m| vec![m]).collect();
                println!("{}", pretty_table(&["Month"], rows));
            }
        }
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_or_current(sub: &clap::ArgMatches) -> String {
    opt_arg(sub, "month")
        .map(str::to_string)
        .unwrap_or_else(current_month)
}

fn monthly<S: RecordStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub);
    let report = ledger.monthly_report(&month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = ledger.settings()?.currency;
    let rows = vec![
        vec!["Income".into(), fmt_money(&report.income, &ccy)],
        vec!["Expense".into(), fmt_money(&report.expense, &ccy)],
        vec!["Balance".into(), fmt_money(&report.balance, &ccy)],
        vec!["Savings".into(), fmt_money(&report.savings, &ccy)],
        vec!["Payable (dena)".into(), fmt_money(&report.payable, &ccy)],
        vec!["Receivable (pona)".into(), fmt_money(&report.receivable, &ccy)],
    ];
    println!("{}", pretty_table(&[month.as_str(), "Amount"], rows));
    if let Some(b) = ledger.budget(&month)? {
        println!(
            "Starting balance {}, salary {}",
            fmt_money(&b.starting_balance, &ccy),
            fmt_money(&b.salary, &ccy)
        );
    }
    Ok(())
}

fn by_category<S: RecordStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub);
    let ty: EntryType = opt_arg(sub, "type").unwrap_or("expense").parse()?;
    let items = ledger.category_breakdown(&month, ty)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let rows = items
            .into_iter()
            .map(|i| vec![i.category, i.count.to_string(), format!("{:.2}", i.total)])
            .collect();
        let hdr = match ty {
            EntryType::Income => "Earned",
            EntryType::Expense => "Spent",
        };
        println!("{}", pretty_table(&["Category", "Count", hdr], rows));
    }
    Ok(())
}
