// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hisabkitab::Error;
use hisabkitab::calendar::parse_timestamp;
use hisabkitab::ledger::Ledger;
use hisabkitab::models::{
    Contact, ContactStatus, ContactType, EntryType, Language, NewContact, NewSaving,
    NewTransaction, SettingsPatch, Transaction,
};
use hisabkitab::query::TransactionFilter;
use hisabkitab::snapshot::{SNAPSHOT_VERSION, Snapshot};
use hisabkitab::store::{MemoryStore, RecordStore, SqliteStore};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn populated() -> Ledger<SqliteStore> {
    let mut l = Ledger::new(SqliteStore::open_in_memory().unwrap());
    l.init().unwrap();
    let salary = l.category_named("Salary").unwrap().map(|c| c.id);
    l.create_transaction(NewTransaction {
        amount: dec("50000"),
        r#type: EntryType::Income,
        date: parse_timestamp("2024-03-01T10:00:00").unwrap(),
        category_id: salary,
        payment_method: Some("Bank".into()),
        note: Some("March salary".into()),
        is_recurring: true,
    })
    .unwrap();
    l.create_transaction(NewTransaction {
        amount: dec("499.99"),
        r#type: EntryType::Expense,
        date: parse_timestamp("2024-03-05").unwrap(),
        category_id: None,
        payment_method: None,
        note: None,
        is_recurring: false,
    })
    .unwrap();
    l.create_saving(NewSaving {
        purpose: "DPS".into(),
        amount: dec("2000"),
        date: parse_timestamp("2024-03-10").unwrap(),
        note: None,
    })
    .unwrap();
    let c = l
        .create_contact(NewContact {
            name: "Rahim".into(),
            phone: None,
            r#type: ContactType::Payable,
            amount: dec("1000"),
            due_date: Some(parse_timestamp("2024-04-30").unwrap()),
        })
        .unwrap();
    l.pay_contact(c.id, dec("200")).unwrap();
    l.update_settings(SettingsPatch {
        language: Some(Language::En),
        ..Default::default()
    })
    .unwrap();
    l.set_budget("2024-03", dec("1500"), dec("50000")).unwrap();
    l
}

#[test]
fn export_then_import_into_empty_store_restores_everything() {
    let src = populated();
    let snap = src.export_snapshot().unwrap();
    assert_eq!(snap.version, SNAPSHOT_VERSION);
    assert!(snap.export_date.ends_with('Z'));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(&path, snap.to_json_pretty().unwrap()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let mut dst = Ledger::new(MemoryStore::new());
    let summary = dst.import_snapshot(Snapshot::from_json(&raw).unwrap()).unwrap();
    assert_eq!(summary.transactions, 2);
    assert_eq!(summary.savings, 1);
    assert_eq!(summary.contacts, 1);
    assert_eq!(summary.categories, 13);
    assert_eq!(summary.payment_methods, 6);
    assert_eq!(summary.monthly_budgets, 1);
    assert!(summary.settings);

    let a: Vec<Transaction> = src.store().list().unwrap();
    let b: Vec<Transaction> = dst.store().list().unwrap();
    assert_eq!(a, b);
    let a: Vec<Contact> = src.store().list().unwrap();
    let b: Vec<Contact> = dst.store().list().unwrap();
    assert_eq!(a, b);
    assert_eq!(src.list_categories().unwrap(), dst.list_categories().unwrap());
    assert_eq!(dst.settings().unwrap().language, Language::En);
    assert_eq!(
        src.monthly_report("2024-03").unwrap(),
        dst.monthly_report("2024-03").unwrap()
    );
    assert_eq!(
        dst.budget("2024-03").unwrap().unwrap().starting_balance,
        dec("1500")
    );
}

#[test]
fn json_uses_camel_case_and_string_amounts() {
    let snap = populated().export_snapshot().unwrap();
    let v: serde_json::Value = serde_json::from_str(&snap.to_json_pretty().unwrap()).unwrap();
    assert_eq!(v["version"], 1);
    assert!(v["paymentMethods"].is_array());
    assert!(v["monthlyBudgets"].is_array());
    let tx = &v["transactions"][1];
    assert_eq!(tx["amount"], "499.99");
    assert_eq!(tx["paymentMethod"], "Cash");
    assert_eq!(tx["month"], "2024-03");
    assert_eq!(v["contacts"][0]["paidAmount"], "200");
    assert_eq!(v["contacts"][0]["status"], "PARTIAL");
    assert_eq!(v["settings"]["language"], "EN");
}

#[test]
fn import_upserts_and_keeps_unlisted_records() {
    let mut l = Ledger::new(MemoryStore::new());
    let keep = l
        .create_transaction(NewTransaction {
            amount: dec("10"),
            r#type: EntryType::Expense,
            date: parse_timestamp("2024-01-01").unwrap(),
            category_id: None,
            payment_method: None,
            note: Some("keep me".into()),
            is_recurring: false,
        })
        .unwrap();
    let raw = r#"{
        "version": 1,
        "transactions": [
            {"id": 2, "amount": "25", "type": "EXPENSE", "date": "2024-01-02T08:00:00"},
            {"id": 40, "amount": 100.5, "type": "INCOME", "date": "2024-02-10", "month": "1999-01"}
        ]
    }"#;
    let summary = l.import_snapshot(Snapshot::from_json(raw).unwrap()).unwrap();
    assert_eq!(summary.transactions, 2);
    assert!(!summary.settings);

    let all = l.list_transactions(&TransactionFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    let kept = l.get_transaction(keep.id).unwrap();
    assert_eq!(kept.note.as_deref(), Some("keep me"));

    let imported = l.get_transaction(40).unwrap();
    assert_eq!(imported.amount, dec("100.5"));
    assert_eq!(imported.r#type, EntryType::Income);
    assert_eq!(imported.month, "2024-02");
    assert_eq!(imported.payment_method, "Cash");

    // Importing the same id again replaces it.
    let raw = r#"{"transactions":[{"id":40,"amount":"7","type":"EXPENSE","date":"2024-02-11"}]}"#;
    l.import_snapshot(Snapshot::from_json(raw).unwrap()).unwrap();
    let replaced = l.get_transaction(40).unwrap();
    assert_eq!(replaced.amount, dec("7"));
    assert_eq!(replaced.r#type, EntryType::Expense);
    assert_eq!(l.list_transactions(&TransactionFilter::default()).unwrap().len(), 3);

    // New inserts never collide with imported ids.
    let fresh = l
        .create_transaction(NewTransaction {
            amount: dec("1"),
            r#type: EntryType::Expense,
            date: parse_timestamp("2024-03-01").unwrap(),
            category_id: None,
            payment_method: None,
            note: None,
            is_recurring: false,
        })
        .unwrap();
    assert!(fresh.id > 40);
}

#[test]
fn contact_status_is_rederived_on_import() {
    let mut l = Ledger::new(SqliteStore::open_in_memory().unwrap());
    let raw = r#"{"version":1,"contacts":[
        {"id":1,"name":"Karim","type":"RECEIVABLE","amount":"300","paidAmount":"300","status":"PENDING"},
        {"id":2,"name":"Jamal","type":"PAYABLE","amount":"50"}
    ]}"#;
    l.import_snapshot(Snapshot::from_json(raw).unwrap()).unwrap();
    assert_eq!(l.get_contact(1).unwrap().status, ContactStatus::Paid);
    let jamal = l.get_contact(2).unwrap();
    assert_eq!((jamal.paid_amount, jamal.status), (Decimal::ZERO, ContactStatus::Pending));
}

#[test]
fn invalid_snapshot_writes_nothing() {
    let mut l = Ledger::new(MemoryStore::new());
    let raw = r#"{"version":1,
        "transactions":[{"id":1,"amount":"5","type":"EXPENSE","date":"2024-03-01"}],
        "contacts":[{"id":1,"name":"Bad","type":"PAYABLE","amount":"100","paidAmount":"150"}]}"#;
    let err = l.import_snapshot(Snapshot::from_json(raw).unwrap()).unwrap_err();
    match err {
        Error::Validation { field, message } => {
            assert_eq!(field, "paidAmount");
            assert!(message.contains("contact 1"), "{}", message);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(l.list_transactions(&TransactionFilter::default()).unwrap().is_empty());
    assert!(l.list_contacts().unwrap().is_empty());
}

#[test]
fn newer_version_is_rejected() {
    let mut l = Ledger::new(MemoryStore::new());
    let raw = r#"{"version":2,"transactions":[{"id":1,"amount":"5","type":"EXPENSE","date":"2024-03-01"}]}"#;
    let err = l.import_snapshot(Snapshot::from_json(raw).unwrap()).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "version", .. }));
    assert!(l.list_transactions(&TransactionFilter::default()).unwrap().is_empty());
}

#[test]
fn malformed_json_is_a_snapshot_error() {
    assert!(matches!(Snapshot::from_json("{not json"), Err(Error::Snapshot(_))));
    assert!(matches!(
        Snapshot::from_json(r#"{"transactions":[{"id":1,"amount":"5","type":"EXPENSE","date":"soon"}]}"#),
        Err(Error::Snapshot(_))
    ));
}

#[test]
fn empty_object_is_an_empty_snapshot() {
    let snap = Snapshot::from_json("{}").unwrap();
    assert_eq!(snap.version, SNAPSHOT_VERSION);
    assert!(snap.transactions.is_empty() && snap.settings.is_none());
    let mut l = Ledger::new(MemoryStore::new());
    let summary = l.import_snapshot(snap).unwrap();
    assert_eq!(summary.transactions + summary.contacts, 0);
}
