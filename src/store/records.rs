// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rusqlite::Row;
use rusqlite::types::{Type, Value};
use rust_decimal::Decimal;

use super::{Record, RecordKind, Tables};
use crate::calendar::format_timestamp;
use crate::models::{Category, Contact, PaymentMethod, Saving, Transaction};

/// Decimals are stored as TEXT to keep them exact.
pub(crate) fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn decimal_value(d: &Decimal) -> Value {
    Value::Text(d.to_string())
}

fn timestamp_value(ts: &NaiveDateTime) -> Value {
    Value::Text(format_timestamp(ts))
}

impl Record for Transaction {
    const KIND: RecordKind = RecordKind::Transaction;
    const COLUMNS: &'static [&'static str] = &[
        "amount",
        "type",
        "date",
        "category_id",
        "payment_method",
        "note",
        "month",
        "is_recurring",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sql_values(&self) -> Vec<Value> {
        vec![
            decimal_value(&self.amount),
            Value::Text(self.r#type.as_str().to_string()),
            timestamp_value(&self.date),
            Value::from(self.category_id),
            Value::Text(self.payment_method.clone()),
            Value::from(self.note.clone()),
            Value::Text(self.month.clone()),
            Value::from(self.is_recurring),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Transaction {
            id: row.get(0)?,
            amount: decimal_at(row, 1)?,
            r#type: row.get(2)?,
            date: row.get(3)?,
            category_id: row.get(4)?,
            payment_method: row.get(5)?,
            note: row.get(6)?,
            month: row.get(7)?,
            is_recurring: row.get(8)?,
        })
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.transactions
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.transactions
    }
}

impl Record for Saving {
    const KIND: RecordKind = RecordKind::Saving;
    const COLUMNS: &'static [&'static str] = &["purpose", "amount", "date", "note", "month"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sql_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.purpose.clone()),
            decimal_value(&self.amount),
            timestamp_value(&self.date),
            Value::from(self.note.clone()),
            Value::Text(self.month.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Saving {
            id: row.get(0)?,
            purpose: row.get(1)?,
            amount: decimal_at(row, 2)?,
            date: row.get(3)?,
            note: row.get(4)?,
            month: row.get(5)?,
        })
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.savings
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.savings
    }
}

impl Record for Contact {
    const KIND: RecordKind = RecordKind::Contact;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "phone",
        "type",
        "amount",
        "paid_amount",
        "status",
        "due_date",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sql_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::from(self.phone.clone()),
            Value::Text(self.r#type.as_str().to_string()),
            decimal_value(&self.amount),
            decimal_value(&self.paid_amount),
            Value::Text(self.status.as_str().to_string()),
            self.due_date.as_ref().map_or(Value::Null, timestamp_value),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Contact {
            id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            r#type: row.get(3)?,
            amount: decimal_at(row, 4)?,
            paid_amount: decimal_at(row, 5)?,
            status: row.get(6)?,
            due_date: row.get(7)?,
        })
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.contacts
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.contacts
    }
}

impl Record for Category {
    const KIND: RecordKind = RecordKind::Category;
    const COLUMNS: &'static [&'static str] = &["name", "icon", "color", "type", "is_private"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sql_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.icon.clone()),
            Value::Text(self.color.clone()),
            Value::Text(self.r#type.as_str().to_string()),
            Value::from(self.is_private),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            icon: row.get(2)?,
            color: row.get(3)?,
            r#type: row.get(4)?,
            is_private: row.get(5)?,
        })
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.categories
    }
}

impl Record for PaymentMethod {
    const KIND: RecordKind = RecordKind::PaymentMethod;
    const COLUMNS: &'static [&'static str] = &["name", "icon", "is_default"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sql_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.icon.clone()),
            Value::from(self.is_default),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PaymentMethod {
            id: row.get(0)?,
            name: row.get(1)?,
            icon: row.get(2)?,
            is_default: row.get(3)?,
        })
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.payment_methods
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.payment_methods
    }
}
