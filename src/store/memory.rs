// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use super::{Record, RecordKind, RecordStore, Tables};
use crate::error::{Error, Result};
use crate::models::{MonthlyBudget, Settings};

/// A process-local store for the offline deployment and for tests.
///
/// Ids are never reused within one store, even after deletes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Tables,
    high_water: HashMap<RecordKind, i64>,
    settings: Option<Settings>,
    budgets: BTreeMap<String, MonthlyBudget>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self, kind: RecordKind, id: i64) {
        let hw = self.high_water.entry(kind).or_insert(0);
        if id > *hw {
            *hw = id;
        }
    }
}

impl RecordStore for MemoryStore {
    fn list<T: Record>(&self) -> Result<Vec<T>> {
        Ok(T::table(&self.tables).values().cloned().collect())
    }

    fn get<T: Record>(&self, id: i64) -> Result<T> {
        T::table(&self.tables)
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound { kind: T::KIND, id })
    }

    fn insert<T: Record>(&mut self, mut record: T) -> Result<T> {
        let id = self.high_water.get(&T::KIND).copied().unwrap_or(0) + 1;
        self.bump(T::KIND, id);
        record.set_id(id);
        T::table_mut(&mut self.tables).insert(id, record.clone());
        Ok(record)
    }

    fn put<T: Record>(&mut self, record: &T) -> Result<()> {
        self.bump(T::KIND, record.id());
        T::table_mut(&mut self.tables).insert(record.id(), record.clone());
        Ok(())
    }

    fn delete<T: Record>(&mut self, id: i64) -> Result<()> {
        T::table_mut(&mut self.tables)
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound { kind: T::KIND, id })
    }

    fn settings(&self) -> Result<Option<Settings>> {
        Ok(self.settings.clone())
    }

    fn put_settings(&mut self, settings: &Settings) -> Result<()> {
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn budgets(&self) -> Result<Vec<MonthlyBudget>> {
        Ok(self.budgets.values().cloned().collect())
    }

    fn put_budget(&mut self, budget: &MonthlyBudget) -> Result<()> {
        self.budgets.insert(budget.month.clone(), budget.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.tables = Tables::default();
        self.settings = None;
        self.budgets.clear();
        Ok(())
    }
}
