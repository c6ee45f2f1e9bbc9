// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backup file format.
//!
//! A snapshot is a JSON object keyed by table name (`transactions`,
//! `savings`, `contacts`, `categories`, `paymentMethods`, `settings`,
//! `monthlyBudgets`) plus `version` and `exportDate`. Restoring upserts by
//! id, so a partial file only touches the records it contains.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::balance::{check_invariant, derive_status};
use crate::calendar::{month_key, parse_month};
use crate::error::{Error, Result};
use crate::ledger::{check_budget, ensure_positive, required};
use crate::models::{
    Category, Contact, MonthlyBudget, PaymentMethod, Saving, Settings, Transaction,
};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub savings: Vec<Saving>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub monthly_budgets: Vec<MonthlyBudget>,
}

impl Snapshot {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub transactions: usize,
    pub savings: usize,
    pub contacts: usize,
    pub categories: usize,
    pub payment_methods: usize,
    pub monthly_budgets: usize,
    pub settings: bool,
}

impl ImportSummary {
    pub fn of(snap: &Snapshot) -> Self {
        ImportSummary {
            transactions: snap.transactions.len(),
            savings: snap.savings.len(),
            contacts: snap.contacts.len(),
            categories: snap.categories.len(),
            payment_methods: snap.payment_methods.len(),
            monthly_budgets: snap.monthly_budgets.len(),
            settings: snap.settings.is_some(),
        }
    }
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

pub fn export_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate every record and rebuild the derived fields.
///
/// `month` is recomputed from `date` and contact `status` from
/// `paidAmount`; whatever the file says about either is ignored.
pub fn normalize(mut snap: Snapshot) -> Result<Snapshot> {
    if snap.version > SNAPSHOT_VERSION {
        tracing::warn!(version = snap.version, "Refusing snapshot from a newer release");
        return Err(Error::validation(
            "version",
            format!(
                "snapshot version {} is newer than supported version {}",
                snap.version, SNAPSHOT_VERSION
            ),
        ));
    }
    for t in &mut snap.transactions {
        ensure_positive("amount", t.amount).map_err(|e| in_record("transaction", t.id, e))?;
        let method = t.payment_method.trim().to_string();
        if method.is_empty() {
            return Err(in_record(
                "transaction",
                t.id,
                Error::validation("paymentMethod", "must not be empty"),
            ));
        }
        t.payment_method = method;
        t.month = month_key(&t.date);
    }
    for s in &mut snap.savings {
        ensure_positive("amount", s.amount).map_err(|e| in_record("saving", s.id, e))?;
        s.purpose = required("purpose", &s.purpose).map_err(|e| in_record("saving", s.id, e))?;
        s.month = month_key(&s.date);
    }
    for c in &mut snap.contacts {
        check_invariant(c.amount, c.paid_amount).map_err(|e| in_record("contact", c.id, e))?;
        c.status = derive_status(c.amount, c.paid_amount);
    }
    for c in &snap.categories {
        required("name", &c.name).map_err(|e| in_record("category", c.id, e))?;
    }
    for m in &snap.payment_methods {
        required("name", &m.name).map_err(|e| in_record("payment method", m.id, e))?;
    }
    for b in &mut snap.monthly_budgets {
        b.month = parse_month(&b.month)?;
        check_budget(b)?;
    }
    Ok(snap)
}

/// Prefix a validation message with the record it came from.
fn in_record(kind: &str, id: i64, e: Error) -> Error {
    match e {
        Error::Validation { field, message } => Error::Validation {
            field,
            message: format!("{} (in {} {})", message, kind, id),
        },
        other => other,
    }
}
