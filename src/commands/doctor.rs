// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::balance::{check_invariant, derive_status};
use crate::calendar::month_key;
use crate::ledger::Ledger;
use crate::models::{Category, Contact, PaymentMethod, Saving, Transaction};
use crate::store::RecordStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let rows = diagnose(ledger.store())?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Collect `[issue, detail]` rows for anything violating ledger invariants.
pub fn diagnose<S: RecordStore>(store: &S) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let transactions: Vec<Transaction> = store.list()?;
    let savings: Vec<Saving> = store.list()?;
    let contacts: Vec<Contact> = store.list()?;
    let categories: HashSet<i64> = store.list::<Category>()?.iter().map(|c| c.id).collect();
    let methods: HashSet<String> = store
        .list::<PaymentMethod>()?
        .into_iter()
        .map(|m| m.name)
        .collect();

    // 1) month keys out of sync with dates
    for t in &transactions {
        let expected = month_key(&t.date);
        if t.month != expected {
            rows.push(vec![
                "stale_month".into(),
                format!("transaction {}: {} (expected {})", t.id, t.month, expected),
            ]);
        }
    }
    for s in &savings {
        let expected = month_key(&s.date);
        if s.month != expected {
            rows.push(vec![
                "stale_month".into(),
                format!("saving {}: {} (expected {})", s.id, s.month, expected),
            ]);
        }
    }

    // 2) contact balances and statuses
    for c in &contacts {
        if let Err(e) = check_invariant(c.amount, c.paid_amount) {
            rows.push(vec!["contact_balance".into(), format!("contact {}: {}", c.id, e)]);
        } else if c.status != derive_status(c.amount, c.paid_amount) {
            rows.push(vec![
                "contact_status".into(),
                format!(
                    "contact {}: {} with {} of {} paid",
                    c.id, c.status, c.paid_amount, c.amount
                ),
            ]);
        }
    }

    // 3) loose references, tolerated but worth knowing about
    for t in &transactions {
        if let Some(cat) = t.category_id.filter(|id| !categories.contains(id)) {
            rows.push(vec![
                "dangling_category".into(),
                format!("transaction {}: category {}", t.id, cat),
            ]);
        }
        if !methods.contains(&t.payment_method) {
            rows.push(vec![
                "unknown_payment_method".into(),
                format!("transaction {}: '{}'", t.id, t.payment_method),
            ]);
        }
    }
    Ok(rows)
}
