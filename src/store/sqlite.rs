// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use super::records::{decimal_at, decimal_value};
use super::{Record, RecordKind, RecordStore};
use crate::error::{Error, Result};
use crate::models::{Language, MonthlyBudget, Settings};

/// SQLite-backed record store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, creating any missing tables.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        crate::db::init_schema(&mut conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush and close the underlying connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::from(e))
    }
}

fn select_sql<T: Record>() -> String {
    format!(
        "SELECT id, {} FROM {}",
        T::COLUMNS.join(", "),
        T::KIND.table()
    )
}

fn placeholders(n: usize, start: usize) -> String {
    (start..start + n)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

impl RecordStore for SqliteStore {
    fn list<T: Record>(&self) -> Result<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id", select_sql::<T>()))?;
        let rows = stmt.query_map([], |r| T::from_row(r))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn get<T: Record>(&self, id: i64) -> Result<T> {
        self.conn
            .query_row(
                &format!("{} WHERE id=?1", select_sql::<T>()),
                params![id],
                |r| T::from_row(r),
            )
            .optional()?
            .ok_or(Error::NotFound { kind: T::KIND, id })
    }

    fn insert<T: Record>(&mut self, mut record: T) -> Result<T> {
        let sql = format!(
            "INSERT INTO {}({}) VALUES ({})",
            T::KIND.table(),
            T::COLUMNS.join(", "),
            placeholders(T::COLUMNS.len(), 1)
        );
        self.conn.execute(&sql, params_from_iter(record.sql_values()))?;
        record.set_id(self.conn.last_insert_rowid());
        Ok(record)
    }

    fn put<T: Record>(&mut self, record: &T) -> Result<()> {
        let updates = T::COLUMNS
            .iter()
            .map(|c| format!("{c}=excluded.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {}(id, {}) VALUES (?1, {}) ON CONFLICT(id) DO UPDATE SET {}",
            T::KIND.table(),
            T::COLUMNS.join(", "),
            placeholders(T::COLUMNS.len(), 2),
            updates
        );
        let mut values = vec![rusqlite::types::Value::Integer(record.id())];
        values.extend(record.sql_values());
        self.conn.execute(&sql, params_from_iter(values))?;
        Ok(())
    }

    fn delete<T: Record>(&mut self, id: i64) -> Result<()> {
        let n = self.conn.execute(
            &format!("DELETE FROM {} WHERE id=?1", T::KIND.table()),
            params![id],
        )?;
        if n == 0 {
            return Err(Error::NotFound { kind: T::KIND, id });
        }
        Ok(())
    }

    fn settings(&self) -> Result<Option<Settings>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM settings")?;
        let mut cur = stmt.query([])?;
        let mut settings = Settings::default();
        let mut found = false;
        while let Some(r) = cur.next()? {
            let key: String = r.get(0)?;
            let value: String = r.get(1)?;
            found = true;
            match key.as_str() {
                "language" => settings.language = value.parse::<Language>()?,
                "currency" => settings.currency = value,
                "pin_enabled" => settings.pin_enabled = value == "true",
                "pin" => settings.pin = Some(value),
                "notifications_enabled" => settings.notifications_enabled = value == "true",
                "last_notification_date" => settings.last_notification_date = Some(value),
                other => tracing::warn!("Ignoring unknown settings key '{}'", other),
            }
        }
        Ok(found.then_some(settings))
    }

    fn put_settings(&mut self, settings: &Settings) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM settings", [])?;
        let entries = [
            ("language", Some(settings.language.as_str().to_string())),
            ("currency", Some(settings.currency.clone())),
            ("pin_enabled", Some(settings.pin_enabled.to_string())),
            ("pin", settings.pin.clone()),
            (
                "notifications_enabled",
                Some(settings.notifications_enabled.to_string()),
            ),
            ("last_notification_date", settings.last_notification_date.clone()),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                tx.execute(
                    "INSERT INTO settings(key, value) VALUES (?1, ?2)",
                    params![key, value],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn budgets(&self) -> Result<Vec<MonthlyBudget>> {
        let mut stmt = self.conn.prepare(
            "SELECT month, starting_balance, salary FROM monthly_budgets ORDER BY month",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(MonthlyBudget {
                month: r.get(0)?,
                starting_balance: decimal_at(r, 1)?,
                salary: decimal_at(r, 2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn put_budget(&mut self, budget: &MonthlyBudget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO monthly_budgets(month, starting_balance, salary) VALUES (?1, ?2, ?3)
             ON CONFLICT(month) DO UPDATE SET starting_balance=excluded.starting_balance, salary=excluded.salary",
            params![
                budget.month,
                decimal_value(&budget.starting_balance),
                decimal_value(&budget.salary)
            ],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for kind in RecordKind::ALL {
            tx.execute(&format!("DELETE FROM {}", kind.table()), [])?;
        }
        tx.execute("DELETE FROM monthly_budgets", [])?;
        tx.execute("DELETE FROM settings", [])?;
        tx.commit()?;
        Ok(())
    }
}
