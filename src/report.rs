// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly summaries derived from ledger records. Nothing here is stored.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calendar::parse_month;
use crate::error::{Error, Result};
use crate::models::{Category, Contact, ContactStatus, ContactType, EntryType, Saving, Transaction};
use crate::query::{TransactionFilter, filter_savings, filter_transactions};

pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub savings: Decimal,
    pub payable: Decimal,
    pub receivable: Decimal,
}

/// Aggregate one month of activity.
///
/// Income, expense and savings only count records keyed to `month`.
/// Payable and receivable are the outstanding balances of every unpaid
/// contact, regardless of when it was created or when it falls due.
pub fn monthly_report(
    month: &str,
    transactions: &[Transaction],
    savings: &[Saving],
    contacts: &[Contact],
) -> Result<MonthlyReport> {
    let month = parse_month(month)?;

    let income = sum_transactions(transactions, &month, EntryType::Income)?;
    let expense = sum_transactions(transactions, &month, EntryType::Expense)?;
    let savings = checked_total(
        "savings",
        filter_savings(savings.to_vec(), Some(month.as_str()))
            .iter()
            .map(|s| s.amount),
    )?;

    Ok(MonthlyReport {
        income,
        expense,
        // Both sides are non-negative, so the difference cannot overflow.
        balance: income - expense,
        savings,
        payable: outstanding(contacts, ContactType::Payable)?,
        receivable: outstanding(contacts, ContactType::Receivable)?,
    })
}

fn sum_transactions(all: &[Transaction], month: &str, ty: EntryType) -> Result<Decimal> {
    let filter = TransactionFilter::month(month).with_type(ty);
    let field = match ty {
        EntryType::Income => "income",
        EntryType::Expense => "expense",
    };
    checked_total(
        field,
        filter_transactions(all.to_vec(), &filter)
            .iter()
            .map(|t| t.amount),
    )
}

pub fn outstanding(contacts: &[Contact], ty: ContactType) -> Result<Decimal> {
    let field = match ty {
        ContactType::Payable => "payable",
        ContactType::Receivable => "receivable",
    };
    checked_total(
        field,
        contacts
            .iter()
            .filter(|c| c.r#type == ty && c.status != ContactStatus::Paid)
            .map(Contact::outstanding),
    )
}

/// Sum amounts, failing instead of panicking when the total leaves the
/// range `Decimal` can represent.
fn checked_total(
    field: &'static str,
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| Error::validation(field, "total is too large to represent"))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Per-category totals of one transaction type within a month.
///
/// Transactions without a category, or whose category has since been
/// deleted, are grouped under [`UNCATEGORIZED`].
pub fn category_breakdown(
    month: &str,
    ty: EntryType,
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<Vec<CategoryTotal>> {
    let month = parse_month(month)?;
    let names: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut agg: HashMap<String, (Decimal, usize)> = HashMap::new();
    let filter = TransactionFilter::month(month).with_type(ty);
    for t in transactions.iter().filter(|t| filter.matches(t)) {
        let name = t
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNCATEGORIZED);
        let entry = agg.entry(name.to_string()).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.checked_add(t.amount).ok_or_else(|| {
            Error::validation("total", format!("'{}' total is too large to represent", name))
        })?;
        entry.1 += 1;
    }

    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    Ok(items)
}

/// Every month with a transaction or saving, plus `current`, newest first.
pub fn active_months(
    transactions: &[Transaction],
    savings: &[Saving],
    current: &str,
) -> Vec<String> {
    let mut months: BTreeSet<String> = BTreeSet::new();
    months.extend(transactions.iter().map(|t| t.month.clone()));
    months.extend(savings.iter().map(|s| s.month.clone()));
    months.insert(current.to_string());
    months.into_iter().rev().collect()
}
