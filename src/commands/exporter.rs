// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::calendar::format_timestamp;
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::report::UNCATEGORIZED;
use crate::store::RecordStore;
use crate::utils::arg;
use anyhow::{Context, Result, bail};

pub const CSV_HEADER: [&str; 6] = ["date", "type", "amount", "category", "paymentMethod", "note"];

pub fn handle<S: RecordStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(m, "format")?.to_lowercase();
    let out = arg(m, "out")?;

    match fmt.as_str() {
        "json" => {
            let snapshot = ledger.export_snapshot()?;
            std::fs::write(out, snapshot.to_json_pretty()?)
                .with_context(|| format!("Write {}", out))?;
            println!(
                "Exported {} transactions, {} savings, {} contacts to {}",
                snapshot.transactions.len(),
                snapshot.savings.len(),
                snapshot.contacts.len(),
                out
            );
        }
        "csv" => {
            let count = export_csv(ledger, out)?;
            println!("Exported {} transactions to {}", count, out);
        }
        _ => bail!("Unknown format: {} (use json|csv)", fmt),
    }
    Ok(())
}

fn export_csv<S: RecordStore>(ledger: &Ledger<S>, out: &str) -> Result<usize> {
    let names: HashMap<i64, String> = ledger
        .list_categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    // Oldest first, the order a spreadsheet user expects.
    let mut txs: Vec<Transaction> = ledger.store().list()?;
    txs.sort_by(|a, b| a.date.cmp(&b.date));

    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record(CSV_HEADER)?;
    for t in &txs {
        let category = t
            .category_id
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        wtr.write_record([
            format_timestamp(&t.date),
            t.r#type.to_string(),
            t.amount.to_string(),
            category,
            t.payment_method.clone(),
            t.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(txs.len())
}
