// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::Error;

pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";
pub const DEFAULT_CURRENCY: &str = "BDT";

/// Generates the string form, parsing and SQLite mapping for a
/// unit-only enum stored as upper-case text.
macro_rules! text_enum {
    ($name:ident, $field:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(Error::validation(
                        $field,
                        format!("unknown value '{}'", other),
                    )),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

/// Direction of a transaction, also used to classify categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
}

text_enum!(EntryType, "type" { Income => "INCOME", Expense => "EXPENSE" });

/// PAYABLE (dena) is money the user owes, RECEIVABLE (pona) is owed to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Payable,
    Receivable,
}

text_enum!(ContactType, "type" { Payable => "PAYABLE", Receivable => "RECEIVABLE" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    Pending,
    Partial,
    Paid,
}

text_enum!(ContactStatus, "status" { Pending => "PENDING", Partial => "PARTIAL", Paid => "PAID" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "BN")]
    Bn,
    #[serde(rename = "EN")]
    En,
}

text_enum!(Language, "language" { Bn => "BN", En => "EN" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub r#type: EntryType,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub r#type: EntryType,
    #[serde(with = "calendar::timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub note: Option<String>,
    /// Always `month_key(date)`; recomputed on every write.
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    pub id: i64,
    pub purpose: String,
    pub amount: Decimal,
    #[serde(with = "calendar::timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub r#type: ContactType,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default = "default_status")]
    pub status: ContactStatus,
    #[serde(default, with = "calendar::timestamp_opt")]
    pub due_date: Option<NaiveDateTime>,
}

impl Contact {
    /// `amount - paid_amount`, never negative for a valid contact.
    pub fn outstanding(&self) -> Decimal {
        self.amount - self.paid_amount
    }
}

/// The singleton settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: Language,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub pin_enabled: bool,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub last_notification_date: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::Bn,
            currency: DEFAULT_CURRENCY.to_string(),
            pin_enabled: false,
            pin: None,
            notifications_enabled: true,
            last_notification_date: None,
        }
    }
}

/// Opening balance and expected salary for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub month: String, // YYYY-MM
    #[serde(default)]
    pub starting_balance: Decimal,
    #[serde(default)]
    pub salary: Decimal,
}

/// A transaction joined with its category, if the reference still resolves.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<Category>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub r#type: EntryType,
    pub date: NaiveDateTime,
    pub category_id: Option<i64>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
    pub is_recurring: bool,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub r#type: Option<EntryType>,
    pub date: Option<NaiveDateTime>,
    pub category_id: Option<Option<i64>>,
    pub payment_method: Option<String>,
    pub note: Option<Option<String>>,
    pub is_recurring: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewSaving {
    pub purpose: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub phone: Option<String>,
    pub r#type: ContactType,
    pub amount: Decimal,
    pub due_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub r#type: Option<ContactType>,
    pub amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub status: Option<ContactStatus>,
    pub due_date: Option<Option<NaiveDateTime>>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub r#type: EntryType,
    pub is_private: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub r#type: Option<EntryType>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewPaymentMethod {
    pub name: String,
    pub icon: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentMethodPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub language: Option<Language>,
    pub currency: Option<String>,
    pub pin_enabled: Option<bool>,
    pub pin: Option<Option<String>>,
    pub notifications_enabled: Option<bool>,
    pub last_notification_date: Option<Option<String>>,
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

fn default_status() -> ContactStatus {
    ContactStatus::Pending
}

fn default_language() -> Language {
    Language::Bn
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}
