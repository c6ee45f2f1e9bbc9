// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::SqliteStore;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.hisabkitab", "HisabKitab", "hisabkitab"));

/// Default database location in the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("hisabkitab.sqlite"))
}

/// Resolve `--db`/`HISABKITAB_DB` if given, else the default location.
pub fn resolve_path(overridden: Option<&Path>) -> Result<PathBuf> {
    match overridden {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            Ok(p.to_path_buf())
        }
        None => db_path(),
    }
}

pub fn open_or_init(path: &Path) -> Result<SqliteStore> {
    let store = SqliteStore::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    tracing::debug!("Opened database at {}", path.display());
    Ok(store)
}

pub(crate) fn init_schema(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        icon TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        is_private INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS payment_methods(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        icon TEXT NOT NULL DEFAULT '',
        is_default INTEGER NOT NULL DEFAULT 0
    );

    -- category_id and payment_method are loose references: deleting a
    -- category or renaming a method must not touch historical rows.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        date TEXT NOT NULL,
        category_id INTEGER,
        payment_method TEXT NOT NULL DEFAULT 'Cash',
        note TEXT,
        month TEXT NOT NULL,
        is_recurring INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_month ON transactions(month);

    CREATE TABLE IF NOT EXISTS savings(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        purpose TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        note TEXT,
        month TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_savings_month ON savings(month);

    CREATE TABLE IF NOT EXISTS contacts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT,
        type TEXT NOT NULL CHECK(type IN ('PAYABLE','RECEIVABLE')),
        amount TEXT NOT NULL,
        paid_amount TEXT NOT NULL DEFAULT '0',
        status TEXT NOT NULL CHECK(status IN ('PENDING','PARTIAL','PAID')),
        due_date TEXT
    );

    CREATE TABLE IF NOT EXISTS monthly_budgets(
        month TEXT PRIMARY KEY,
        starting_balance TEXT NOT NULL DEFAULT '0',
        salary TEXT NOT NULL DEFAULT '0'
    );
    "#,
    )
}
