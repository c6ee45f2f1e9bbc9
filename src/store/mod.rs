// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The record store capability the ledger runs on.
//!
//! A store only persists and returns records; month derivation, status
//! rules and aggregation all happen above it, so every backend shares the
//! same ledger semantics.

mod memory;
mod records;
mod sqlite;

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::Row;
use rusqlite::types::Value;

use crate::error::Result;
use crate::models::{MonthlyBudget, Settings};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Transaction,
    Saving,
    Contact,
    Category,
    PaymentMethod,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Transaction,
        RecordKind::Saving,
        RecordKind::Contact,
        RecordKind::Category,
        RecordKind::PaymentMethod,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Transaction => "transactions",
            RecordKind::Saving => "savings",
            RecordKind::Contact => "contacts",
            RecordKind::Category => "categories",
            RecordKind::PaymentMethod => "payment_methods",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Transaction => "transaction",
            RecordKind::Saving => "saving",
            RecordKind::Contact => "contact",
            RecordKind::Category => "category",
            RecordKind::PaymentMethod => "payment method",
        };
        f.write_str(s)
    }
}

/// In-memory tables, one ordered map per record kind.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub transactions: BTreeMap<i64, crate::models::Transaction>,
    pub savings: BTreeMap<i64, crate::models::Saving>,
    pub contacts: BTreeMap<i64, crate::models::Contact>,
    pub categories: BTreeMap<i64, crate::models::Category>,
    pub payment_methods: BTreeMap<i64, crate::models::PaymentMethod>,
}

/// An entity with an integer id that a [`RecordStore`] can hold.
pub trait Record: Clone + Sized {
    const KIND: RecordKind;

    /// SQL column names following `id`, in [`Record::sql_values`] order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn sql_values(&self) -> Vec<Value>;

    /// Build a record from a row selected as `id, COLUMNS...`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn table(tables: &Tables) -> &BTreeMap<i64, Self>;

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self>;
}

pub trait RecordStore {
    /// All records of one kind in insertion (id) order.
    fn list<T: Record>(&self) -> Result<Vec<T>>;

    fn get<T: Record>(&self, id: i64) -> Result<T>;

    /// Store a new record under a freshly assigned id and return it.
    fn insert<T: Record>(&mut self, record: T) -> Result<T>;

    /// Insert or replace the record with the same id.
    fn put<T: Record>(&mut self, record: &T) -> Result<()>;

    fn delete<T: Record>(&mut self, id: i64) -> Result<()>;

    fn settings(&self) -> Result<Option<Settings>>;

    fn put_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Monthly budgets ordered by month.
    fn budgets(&self) -> Result<Vec<MonthlyBudget>>;

    fn budget(&self, month: &str) -> Result<Option<MonthlyBudget>> {
        Ok(self.budgets()?.into_iter().find(|b| b.month == month))
    }

    fn put_budget(&mut self, budget: &MonthlyBudget) -> Result<()>;

    /// Remove every record, budget and the settings singleton.
    fn clear(&mut self) -> Result<()>;
}
