// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger operations over an injected [`RecordStore`].
//!
//! The ledger owns validation, month derivation and contact status rules.
//! The store is opened by the caller, handed in through [`Ledger::new`] and
//! handed back by [`Ledger::into_store`] for teardown.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::balance::{self, check_invariant, derive_status};
use crate::calendar::{self, month_key, parse_month};
use crate::error::{Error, Result};
use crate::models::{
    Category, CategoryPatch, Contact, ContactPatch, ContactStatus, EntryType, MonthlyBudget,
    NewCategory, NewContact, NewPaymentMethod, NewSaving, NewTransaction, PaymentMethod,
    PaymentMethodPatch, Saving, Settings, SettingsPatch, Transaction, TransactionPatch,
    TransactionView, DEFAULT_PAYMENT_METHOD,
};
use crate::query::{TransactionFilter, filter_savings, filter_transactions};
use crate::report::{self, CategoryTotal, MonthlyReport};
use crate::snapshot::{self, ImportSummary, Snapshot};
use crate::store::RecordStore;

/// (name, icon, color, type) seeded on first run.
const DEFAULT_CATEGORIES: &[(&str, &str, &str, EntryType)] = &[
    ("Salary", "Briefcase", "#10B981", EntryType::Income),
    ("Business", "Store", "#3B82F6", EntryType::Income),
    ("Freelance", "Laptop", "#8B5CF6", EntryType::Income),
    ("Gift", "Gift", "#EC4899", EntryType::Income),
    ("Other Income", "Plus", "#6366F1", EntryType::Income),
    ("Food", "Utensils", "#F59E0B", EntryType::Expense),
    ("Transport", "Car", "#EF4444", EntryType::Expense),
    ("Shopping", "ShoppingBag", "#EC4899", EntryType::Expense),
    ("Bills", "Receipt", "#6366F1", EntryType::Expense),
    ("Entertainment", "Film", "#8B5CF6", EntryType::Expense),
    ("Health", "Heart", "#EF4444", EntryType::Expense),
    ("Education", "GraduationCap", "#3B82F6", EntryType::Expense),
    ("Other", "MoreHorizontal", "#6B7280", EntryType::Expense),
];

/// (name, icon, is_default) seeded on first run.
const DEFAULT_PAYMENT_METHODS: &[(&str, &str, bool)] = &[
    ("Cash", "Banknote", true),
    ("bKash", "Smartphone", false),
    ("Nagad", "Smartphone", false),
    ("Rocket", "Smartphone", false),
    ("Bank", "Landmark", false),
    ("Binance", "Bitcoin", false),
];

pub struct Ledger<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Ledger { store }
    }

    /// Seed default categories and payment methods into an empty store.
    pub fn init(&mut self) -> Result<()> {
        if self.store.list::<Category>()?.is_empty() {
            for (name, icon, color, ty) in DEFAULT_CATEGORIES {
                self.store.insert(Category {
                    id: 0,
                    name: name.to_string(),
                    icon: icon.to_string(),
                    color: color.to_string(),
                    r#type: *ty,
                    is_private: false,
                })?;
            }
            tracing::info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
        }
        if self.store.list::<PaymentMethod>()?.is_empty() {
            for (name, icon, is_default) in DEFAULT_PAYMENT_METHODS {
                self.store.insert(PaymentMethod {
                    id: 0,
                    name: name.to_string(),
                    icon: icon.to_string(),
                    is_default: *is_default,
                })?;
            }
            tracing::info!(
                "Seeded {} default payment methods",
                DEFAULT_PAYMENT_METHODS.len()
            );
        }
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Transactions

    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionView>> {
        if let Some(m) = &filter.month {
            parse_month(m)?;
        }
        let rows = filter_transactions(self.store.list::<Transaction>()?, filter);
        let categories: HashMap<i64, Category> = self
            .store
            .list::<Category>()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let dangling = rows
            .iter()
            .filter(|t| t.category_id.is_some_and(|id| !categories.contains_key(&id)))
            .count();
        if dangling > 0 {
            tracing::warn!("{} transactions reference deleted categories", dangling);
        }
        tracing::debug!(?filter, count = rows.len(), "Listed transactions");
        Ok(rows
            .into_iter()
            .map(|t| {
                let category = t.category_id.and_then(|id| categories.get(&id).cloned());
                TransactionView {
                    transaction: t,
                    category,
                }
            })
            .collect())
    }

    pub fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.store.get(id)
    }

    pub fn create_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        let mut tx = Transaction {
            id: 0,
            amount: new.amount,
            r#type: new.r#type,
            date: new.date,
            category_id: new.category_id,
            payment_method: new
                .payment_method
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            note: clean_note(new.note),
            month: String::new(),
            is_recurring: new.is_recurring,
        };
        self.check_transaction(&tx)?;
        tx.month = month_key(&tx.date);
        let tx = self.store.insert(tx)?;
        tracing::info!(
            id = tx.id,
            month = %tx.month,
            "Created {} transaction of {}",
            tx.r#type,
            tx.amount
        );
        Ok(tx)
    }

    pub fn update_transaction(&mut self, id: i64, patch: TransactionPatch) -> Result<Transaction> {
        let mut tx: Transaction = self.store.get(id)?;
        if let Some(amount) = patch.amount {
            tx.amount = amount;
        }
        if let Some(ty) = patch.r#type {
            tx.r#type = ty;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }
        if let Some(cat) = patch.category_id {
            tx.category_id = cat;
        }
        if let Some(method) = patch.payment_method {
            tx.payment_method = method.trim().to_string();
        }
        if let Some(note) = patch.note {
            tx.note = clean_note(note);
        }
        if let Some(r) = patch.is_recurring {
            tx.is_recurring = r;
        }
        self.check_transaction(&tx)?;
        tx.month = month_key(&tx.date);
        self.store.put(&tx)?;
        tracing::info!(id, month = %tx.month, "Updated transaction");
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<()> {
        self.store.delete::<Transaction>(id)?;
        tracing::info!(id, "Deleted transaction");
        Ok(())
    }

    fn check_transaction(&self, tx: &Transaction) -> Result<()> {
        ensure_positive("amount", tx.amount)?;
        if tx.payment_method.is_empty() {
            return Err(Error::validation("paymentMethod", "must not be empty"));
        }
        if let Some(cat) = tx.category_id {
            match self.store.get::<Category>(cat) {
                Ok(_) => {}
                Err(Error::NotFound { .. }) => {
                    return Err(Error::validation(
                        "categoryId",
                        format!("category {} does not exist", cat),
                    ));
                }
                Err(e) => return Err(e),
            }
        }
        let known = self
            .store
            .list::<PaymentMethod>()?
            .iter()
            .any(|m| m.name == tx.payment_method);
        if !known {
            tracing::warn!(
                "Payment method '{}' is not in the configured list; keeping it as free text",
                tx.payment_method
            );
        }
        Ok(())
    }

    // Savings

    pub fn list_savings(&self, month: Option<&str>) -> Result<Vec<Saving>> {
        let month = month.map(parse_month).transpose()?;
        let rows = filter_savings(self.store.list::<Saving>()?, month.as_deref());
        tracing::debug!(?month, count = rows.len(), "Listed savings");
        Ok(rows)
    }

    pub fn create_saving(&mut self, new: NewSaving) -> Result<Saving> {
        let purpose = required("purpose", &new.purpose)?;
        ensure_positive("amount", new.amount)?;
        let saving = self.store.insert(Saving {
            id: 0,
            purpose,
            amount: new.amount,
            month: month_key(&new.date),
            date: new.date,
            note: clean_note(new.note),
        })?;
        tracing::info!(
            id = saving.id,
            month = %saving.month,
            "Created saving of {}",
            saving.amount
        );
        Ok(saving)
    }

    pub fn delete_saving(&mut self, id: i64) -> Result<()> {
        self.store.delete::<Saving>(id)?;
        tracing::info!(id, "Deleted saving");
        Ok(())
    }

    // Contacts

    pub fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.store.list()
    }

    pub fn get_contact(&self, id: i64) -> Result<Contact> {
        self.store.get(id)
    }

    pub fn create_contact(&mut self, new: NewContact) -> Result<Contact> {
        let name = required("name", &new.name)?;
        check_invariant(new.amount, Decimal::ZERO)?;
        let contact = self.store.insert(Contact {
            id: 0,
            name,
            phone: clean_note(new.phone),
            r#type: new.r#type,
            amount: new.amount,
            paid_amount: Decimal::ZERO,
            status: ContactStatus::Pending,
            due_date: new.due_date,
        })?;
        tracing::info!(
            id = contact.id,
            "Created {} contact for {}",
            contact.r#type,
            contact.amount
        );
        Ok(contact)
    }

    /// Apply a partial update, keeping `status` consistent with `paid_amount`.
    ///
    /// An explicit `PAID` status without a paid amount settles the contact in
    /// full. Any other explicit status must match the one implied by the
    /// resulting paid amount.
    pub fn update_contact(&mut self, id: i64, patch: ContactPatch) -> Result<Contact> {
        let mut contact: Contact = self.store.get(id)?;
        if let Some(name) = patch.name {
            contact.name = required("name", &name)?;
        }
        if let Some(phone) = patch.phone {
            contact.phone = clean_note(phone);
        }
        if let Some(ty) = patch.r#type {
            contact.r#type = ty;
        }
        if let Some(amount) = patch.amount {
            contact.amount = amount;
        }
        if let Some(due) = patch.due_date {
            contact.due_date = due;
        }
        match (patch.paid_amount, patch.status) {
            (Some(paid), _) => contact.paid_amount = paid,
            (None, Some(ContactStatus::Paid)) => contact.paid_amount = contact.amount,
            _ => {}
        }
        check_invariant(contact.amount, contact.paid_amount)?;
        let derived = derive_status(contact.amount, contact.paid_amount);
        if let Some(requested) = patch.status {
            if requested != derived {
                return Err(Error::validation(
                    "status",
                    format!(
                        "{} does not match paid amount {} of {} (expected {})",
                        requested, contact.paid_amount, contact.amount, derived
                    ),
                ));
            }
        }
        contact.status = derived;
        self.store.put(&contact)?;
        tracing::info!(id, status = %contact.status, "Updated contact");
        Ok(contact)
    }

    pub fn pay_contact(&mut self, id: i64, payment: Decimal) -> Result<Contact> {
        let contact: Contact = self.store.get(id)?;
        let updated = balance::apply_payment(&contact, payment)?;
        self.store.put(&updated)?;
        tracing::info!(id, status = %updated.status, "Recorded payment of {}", payment);
        Ok(updated)
    }

    pub fn settle_contact(&mut self, id: i64) -> Result<Contact> {
        let contact: Contact = self.store.get(id)?;
        let updated = balance::mark_fully_paid(&contact);
        self.store.put(&updated)?;
        tracing::info!(id, "Marked contact as paid");
        Ok(updated)
    }

    pub fn delete_contact(&mut self, id: i64) -> Result<()> {
        self.store.delete::<Contact>(id)?;
        tracing::info!(id, "Deleted contact");
        Ok(())
    }

    // Reports

    pub fn monthly_report(&self, month: &str) -> Result<MonthlyReport> {
        let month = parse_month(month)?;
        let transactions = self.store.list::<Transaction>()?;
        let savings = self.store.list::<Saving>()?;
        let contacts = self.store.list::<Contact>()?;
        let report = report::monthly_report(&month, &transactions, &savings, &contacts)?;
        tracing::debug!(%month, ?report, "Computed monthly report");
        Ok(report)
    }

    pub fn category_breakdown(&self, month: &str, ty: EntryType) -> Result<Vec<CategoryTotal>> {
        let transactions = self.store.list::<Transaction>()?;
        let categories = self.store.list::<Category>()?;
        report::category_breakdown(month, ty, &transactions, &categories)
    }

    /// Months with any activity plus the current month, newest first.
    pub fn months(&self) -> Result<Vec<String>> {
        let transactions = self.store.list::<Transaction>()?;
        let savings = self.store.list::<Saving>()?;
        Ok(report::active_months(
            &transactions,
            &savings,
            &calendar::current_month(),
        ))
    }

    // Categories

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.store.list()
    }

    pub fn category_named(&self, name: &str) -> Result<Option<Category>> {
        let name = name.trim();
        Ok(self
            .store
            .list::<Category>()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    pub fn create_category(&mut self, new: NewCategory) -> Result<Category> {
        let name = required("name", &new.name)?;
        if self.category_named(&name)?.is_some() {
            return Err(Error::validation(
                "name",
                format!("category '{}' already exists", name),
            ));
        }
        let cat = self.store.insert(Category {
            id: 0,
            name,
            icon: new.icon,
            color: new.color,
            r#type: new.r#type,
            is_private: new.is_private,
        })?;
        tracing::info!(id = cat.id, "Created category '{}'", cat.name);
        Ok(cat)
    }

    /// Rename or restyle a category. Transactions reference it by id, so
    /// they follow the new name.
    pub fn update_category(&mut self, id: i64, patch: CategoryPatch) -> Result<Category> {
        let mut cat: Category = self.store.get(id)?;
        if let Some(name) = patch.name {
            let name = required("name", &name)?;
            if let Some(other) = self.category_named(&name)?.filter(|c| c.id != id) {
                return Err(Error::validation(
                    "name",
                    format!("category '{}' already exists", other.name),
                ));
            }
            cat.name = name;
        }
        if let Some(icon) = patch.icon {
            cat.icon = icon;
        }
        if let Some(color) = patch.color {
            cat.color = color;
        }
        if let Some(ty) = patch.r#type {
            cat.r#type = ty;
        }
        if let Some(p) = patch.is_private {
            cat.is_private = p;
        }
        self.store.put(&cat)?;
        tracing::info!(id, "Updated category '{}'", cat.name);
        Ok(cat)
    }

    /// Transactions keep their now-dangling `category_id`.
    pub fn delete_category(&mut self, id: i64) -> Result<()> {
        self.store.delete::<Category>(id)?;
        tracing::info!(id, "Deleted category");
        Ok(())
    }

    // Payment methods

    pub fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        self.store.list()
    }

    pub fn create_payment_method(&mut self, new: NewPaymentMethod) -> Result<PaymentMethod> {
        let name = required("name", &new.name)?;
        let existing = self.store.list::<PaymentMethod>()?;
        if existing.iter().any(|m| m.name == name) {
            return Err(Error::validation(
                "name",
                format!("payment method '{}' already exists", name),
            ));
        }
        if new.is_default {
            for mut m in existing.into_iter().filter(|m| m.is_default) {
                m.is_default = false;
                self.store.put(&m)?;
            }
        }
        let method = self.store.insert(PaymentMethod {
            id: 0,
            name,
            icon: new.icon,
            is_default: new.is_default,
        })?;
        tracing::info!(id = method.id, "Created payment method '{}'", method.name);
        Ok(method)
    }

    /// Renaming leaves existing transactions on the old name; they are
    /// not rewritten.
    pub fn update_payment_method(
        &mut self,
        id: i64,
        patch: PaymentMethodPatch,
    ) -> Result<PaymentMethod> {
        let mut method: PaymentMethod = self.store.get(id)?;
        let existing = self.store.list::<PaymentMethod>()?;
        if let Some(name) = patch.name {
            let name = required("name", &name)?;
            if existing.iter().any(|m| m.id != id && m.name == name) {
                return Err(Error::validation(
                    "name",
                    format!("payment method '{}' already exists", name),
                ));
            }
            method.name = name;
        }
        if let Some(icon) = patch.icon {
            method.icon = icon;
        }
        if let Some(d) = patch.is_default {
            if d {
                for mut m in existing.into_iter().filter(|m| m.id != id && m.is_default) {
                    m.is_default = false;
                    self.store.put(&m)?;
                }
            }
            method.is_default = d;
        }
        self.store.put(&method)?;
        tracing::info!(id, "Updated payment method '{}'", method.name);
        Ok(method)
    }

    /// Transactions reference methods by name and are left untouched.
    pub fn delete_payment_method(&mut self, id: i64) -> Result<()> {
        self.store.delete::<PaymentMethod>(id)?;
        tracing::info!(id, "Deleted payment method");
        Ok(())
    }

    // Settings and budgets

    /// The settings singleton, created with defaults on first access.
    pub fn settings(&mut self) -> Result<Settings> {
        if let Some(s) = self.store.settings()? {
            return Ok(s);
        }
        let s = Settings::default();
        self.store.put_settings(&s)?;
        tracing::info!("Created default settings");
        Ok(s)
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<Settings> {
        let mut s = self.settings()?;
        if let Some(language) = patch.language {
            s.language = language;
        }
        if let Some(currency) = patch.currency {
            s.currency = required("currency", &currency)?.to_uppercase();
        }
        if let Some(pin) = patch.pin {
            if let Some(p) = &pin {
                if !(4..=8).contains(&p.len()) || !p.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::validation("pin", "must be 4 to 8 digits"));
                }
            }
            s.pin = pin;
        }
        if let Some(enabled) = patch.pin_enabled {
            s.pin_enabled = enabled;
        }
        if s.pin_enabled && s.pin.is_none() {
            return Err(Error::validation("pinEnabled", "a PIN must be set first"));
        }
        if let Some(enabled) = patch.notifications_enabled {
            s.notifications_enabled = enabled;
        }
        if let Some(date) = patch.last_notification_date {
            s.last_notification_date = date;
        }
        self.store.put_settings(&s)?;
        tracing::info!("Updated settings");
        Ok(s)
    }

    pub fn budget(&self, month: &str) -> Result<Option<MonthlyBudget>> {
        let month = parse_month(month)?;
        self.store.budget(&month)
    }

    pub fn set_budget(
        &mut self,
        month: &str,
        starting_balance: Decimal,
        salary: Decimal,
    ) -> Result<MonthlyBudget> {
        let budget = MonthlyBudget {
            month: parse_month(month)?,
            starting_balance,
            salary,
        };
        check_budget(&budget)?;
        self.store.put_budget(&budget)?;
        tracing::info!(month = %budget.month, "Saved monthly budget");
        Ok(budget)
    }

    // Backup and restore

    pub fn export_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            version: snapshot::SNAPSHOT_VERSION,
            export_date: snapshot::export_timestamp(),
            transactions: self.store.list()?,
            savings: self.store.list()?,
            contacts: self.store.list()?,
            categories: self.store.list()?,
            payment_methods: self.store.list()?,
            settings: self.store.settings()?,
            monthly_budgets: self.store.budgets()?,
        })
    }

    /// Upsert every record of a snapshot by id.
    ///
    /// The whole snapshot is validated and normalized before the first
    /// write, so a rejected file leaves the store untouched.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<ImportSummary> {
        let snap = snapshot::normalize(snapshot)?;
        for t in &snap.transactions {
            self.store.put(t)?;
        }
        for s in &snap.savings {
            self.store.put(s)?;
        }
        for c in &snap.contacts {
            self.store.put(c)?;
        }
        for c in &snap.categories {
            self.store.put(c)?;
        }
        for m in &snap.payment_methods {
            self.store.put(m)?;
        }
        for b in &snap.monthly_budgets {
            self.store.put_budget(b)?;
        }
        if let Some(s) = &snap.settings {
            self.store.put_settings(s)?;
        }
        let summary = ImportSummary::of(&snap);
        tracing::info!(?summary, "Imported snapshot");
        Ok(summary)
    }

    /// Wipe everything and re-seed defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Cleared all data");
        self.init()
    }
}

pub(crate) fn ensure_positive(field: &'static str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn check_budget(b: &MonthlyBudget) -> Result<()> {
    if b.starting_balance < Decimal::ZERO {
        return Err(Error::validation("startingBalance", "must not be negative"));
    }
    if b.salary < Decimal::ZERO {
        return Err(Error::validation("salary", "must not be negative"));
    }
    Ok(())
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(v.to_string())
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
