// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar;
use crate::ledger::Ledger;
use crate::models::{EntryType, NewTransaction, TransactionPatch};
use crate::query::TransactionFilter;
use crate::store::RecordStore;
use crate::utils::{
    arg, fmt_date, id_arg, maybe_print_json, opt_arg, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = id_arg(sub, "id")?;
            ledger.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn category_id<S: RecordStore>(ledger: &Ledger<S>, name: Option<&str>) -> Result<Option<i64>> {
    match name {
        Some(n) => {
            let cat = ledger
                .category_named(n)?
                .with_context(|| format!("Category '{}' not found", n))?;
            Ok(Some(cat.id))
        }
        None => Ok(None),
    }
}

fn add<S: RecordStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let ty: EntryType = arg(sub, "type")?.parse()?;
    let date = match opt_arg(sub, "date") {
        Some(d) => parse_date(d)?,
        None => calendar::now(),
    };
    let category_id = category_id(ledger, opt_arg(sub, "category"))?;

    let tx = ledger.create_transaction(NewTransaction {
        amount,
        r#type: ty,
        date,
        category_id,
        payment_method: opt_arg(sub, "method").map(str::to_string),
        note: opt_arg(sub, "note").map(str::to_string),
        is_recurring: sub.get_flag("recurring"),
    })?;
    println!(
        "Recorded {} {} on {} via {} (id {}, month {})",
        tx.r#type,
        tx.amount,
        fmt_date(&tx.date),
        tx.payment_method,
        tx.id,
        tx.month
    );
    Ok(())
}

fn edit<S: RecordStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub, "id")?;
    let category_id = if sub.get_flag("no-category") {
        Some(None)
    } else {
        category_id(ledger, opt_arg(sub, "category"))?.map(Some)
    };
    let patch = TransactionPatch {
        amount: opt_arg(sub, "amount").map(parse_decimal).transpose()?,
        r#type: opt_arg(sub, "type").map(str::parse).transpose()?,
        date: opt_arg(sub, "date").map(parse_date).transpose()?,
        category_id,
        payment_method: opt_arg(sub, "method").map(str::to_string),
        note: opt_arg(sub, "note").map(|n| Some(n.to_string())),
        is_recurring: sub.get_one::<bool>("recurring").copied(),
    };
    let tx = ledger.update_transaction(id, patch)?;
    println!("Updated transaction {} (month {})", tx.id, tx.month);
    Ok(())
}

fn list<S: RecordStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.payment_method.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Method", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub payment_method: String,
    pub note: String,
    pub month: String,
}

pub fn query_rows<S: RecordStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let filter = TransactionFilter {
        month: opt_arg(sub, "month").map(str::to_string),
        r#type: opt_arg(sub, "type").map(str::parse).transpose()?,
        category_id: category_id(ledger, opt_arg(sub, "category"))?,
        payment_method: opt_arg(sub, "method").map(str::to_string),
        search: opt_arg(sub, "search").map(str::to_string),
    };
    let mut views = ledger.list_transactions(&filter)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        views.truncate(*limit);
    }
    Ok(views
        .into_iter()
        .map(|v| TransactionRow {
            id: v.transaction.id,
            date: fmt_date(&v.transaction.date),
            r#type: v.transaction.r#type.to_string(),
            amount: v.transaction.amount.to_string(),
            category: v
                .category
                .map(|c| c.name)
                .unwrap_or_else(|| crate::report::UNCATEGORIZED.to_string()),
            payment_method: v.transaction.payment_method,
            note: v.transaction.note.unwrap_or_default(),
            month: v.transaction.month,
        })
        .collect())
}
