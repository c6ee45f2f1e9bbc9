// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, hash_map::Entry};

use crate::ledger::Ledger;
use crate::models::{EntryType, NewTransaction};
use crate::report::UNCATEGORIZED;
use crate::snapshot::Snapshot;
use crate::store::RecordStore;
use crate::utils::{arg, parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow, bail};
use csv::ReaderBuilder;
use rust_decimal::Decimal;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let path = arg(m, "path")?;
    match arg(m, "format")?.to_lowercase().as_str() {
        "json" => import_snapshot(ledger, path),
        "csv" => import_transactions(ledger, path),
        other => bail!("Unknown format: {} (use json|csv)", other),
    }
}

fn import_snapshot<S: RecordStore>(ledger: &mut Ledger<S>, path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let snapshot = Snapshot::from_json(&raw).with_context(|| format!("Parse {}", path))?;
    let summary = ledger.import_snapshot(snapshot)?;
    println!(
        "Restored {} transactions, {} savings, {} contacts, {} categories, {} payment methods from {}",
        summary.transactions,
        summary.savings,
        summary.contacts,
        summary.categories,
        summary.payment_methods,
        path
    );
    Ok(())
}

/// Load `date,type,amount,category,paymentMethod,note` rows.
///
/// Every row is parsed before the first one is written, so a bad row
/// aborts the import without partial data.
fn import_transactions<S: RecordStore>(ledger: &mut Ledger<S>, path: &str) -> Result<()> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut category_cache: HashMap<String, Option<i64>> = HashMap::new();
    let mut pending = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let type_raw = rec.get(1).context("type missing")?.trim();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let category = rec.get(3).unwrap_or("").trim().to_string();
        let method = rec.get(4).map(str::trim).filter(|s| !s.is_empty());
        let note = rec.get(5).map(str::trim).filter(|s| !s.is_empty());

        let date = parse_date(date_raw).with_context(|| format!("Row {}", row))?;
        let ty: EntryType = type_raw.parse().with_context(|| format!("Row {}", row))?;
        let amount = parse_decimal(amount_raw).with_context(|| format!("Row {}", row))?;
        if amount <= Decimal::ZERO {
            return Err(anyhow!("Row {}: amount must be greater than zero", row));
        }

        let category_id = if category.is_empty() || category == UNCATEGORIZED {
            None
        } else {
            match category_cache.entry(category.clone()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let found = ledger.category_named(&category)?.map(|c| c.id);
                    if found.is_none() {
                        tracing::warn!(
                            "Row {}: unknown category '{}', importing uncategorized",
                            row,
                            category
                        );
                    }
                    *entry.insert(found)
                }
            }
        };

        pending.push(NewTransaction {
            amount,
            r#type: ty,
            date,
            category_id,
            payment_method: method.map(str::to_string),
            note: note.map(str::to_string),
            is_recurring: false,
        });
    }

    let count = pending.len();
    for new in pending {
        ledger.create_transaction(new)?;
    }
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
