// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filtering and ordering of ledger records.
//!
//! Inputs are expected in insertion order; results are sorted newest first
//! with a stable sort, so records sharing a timestamp keep insertion order.

use serde::{Deserialize, Serialize};

use crate::models::{EntryType, Saving, Transaction};

/// Transaction filters, combined with logical AND. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub month: Option<String>,
    pub r#type: Option<EntryType>,
    pub category_id: Option<i64>,
    pub payment_method: Option<String>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn month(month: impl Into<String>) -> Self {
        TransactionFilter {
            month: Some(month.into()),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, t: EntryType) -> Self {
        self.r#type = Some(t);
        self
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(month) = &self.month {
            if &t.month != month {
                return false;
            }
        }
        if let Some(ty) = self.r#type {
            if t.r#type != ty {
                return false;
            }
        }
        if let Some(cat) = self.category_id {
            if t.category_id != Some(cat) {
                return false;
            }
        }
        if let Some(method) = &self.payment_method {
            if &t.payment_method != method {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => note_contains(t.note.as_deref(), term),
            _ => true,
        }
    }
}

fn note_contains(note: Option<&str>, term: &str) -> bool {
    match note {
        Some(n) if !n.is_empty() => n.to_lowercase().contains(&term.to_lowercase()),
        _ => false,
    }
}

pub fn filter_transactions(all: Vec<Transaction>, filter: &TransactionFilter) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = all.into_iter().filter(|t| filter.matches(t)).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn filter_savings(all: Vec<Saving>, month: Option<&str>) -> Vec<Saving> {
    let mut out: Vec<Saving> = all
        .into_iter()
        .filter(|s| month.is_none_or(|m| s.month == m))
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
