// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hisabkitab::Error;
use hisabkitab::calendar::parse_timestamp;
use hisabkitab::ledger::Ledger;
use hisabkitab::models::{ContactType, EntryType, NewContact, NewSaving, NewTransaction};
use hisabkitab::report::{MonthlyReport, UNCATEGORIZED};
use hisabkitab::store::{MemoryStore, RecordStore, SqliteStore};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn add_tx<S: RecordStore>(
    l: &mut Ledger<S>,
    amount: i64,
    ty: EntryType,
    date: &str,
    category_id: Option<i64>,
) -> i64 {
    l.create_transaction(NewTransaction {
        amount: dec(amount),
        r#type: ty,
        date: parse_timestamp(date).unwrap(),
        category_id,
        payment_method: None,
        note: None,
        is_recurring: false,
    })
    .unwrap()
    .id
}

fn add_contact<S: RecordStore>(l: &mut Ledger<S>, name: &str, ty: ContactType, amount: i64) -> i64 {
    l.create_contact(NewContact {
        name: name.into(),
        phone: None,
        r#type: ty,
        amount: dec(amount),
        due_date: None,
    })
    .unwrap()
    .id
}

/// March 2024: salary in, lunch out, one DPS deposit, one open debt.
fn march<S: RecordStore>(l: &mut Ledger<S>) -> (i64, i64, i64) {
    let salary = add_tx(l, 50000, EntryType::Income, "2024-03-01", None);
    let lunch = add_tx(l, 500, EntryType::Expense, "2024-03-05", None);
    l.create_saving(NewSaving {
        purpose: "DPS".into(),
        amount: dec(2000),
        date: parse_timestamp("2024-03-10").unwrap(),
        note: None,
    })
    .unwrap();
    let rahim = add_contact(l, "Rahim", ContactType::Payable, 1000);
    l.pay_contact(rahim, dec(200)).unwrap();
    (salary, lunch, rahim)
}

fn march_scenario<S: RecordStore>(mut l: Ledger<S>) {
    march(&mut l);
    let r = l.monthly_report("2024-03").unwrap();
    assert_eq!(
        r,
        MonthlyReport {
            income: dec(50000),
            expense: dec(500),
            balance: dec(49500),
            savings: dec(2000),
            payable: dec(800),
            receivable: dec(0),
        }
    );
}

#[test]
fn march_scenario_in_memory() {
    march_scenario(Ledger::new(MemoryStore::new()));
}

#[test]
fn march_scenario_sqlite() {
    march_scenario(Ledger::new(SqliteStore::open_in_memory().unwrap()));
}

#[test]
fn empty_month_is_all_zero_except_contacts() {
    let mut l = Ledger::new(MemoryStore::new());
    march(&mut l);
    let r = l.monthly_report("2023-01").unwrap();
    assert_eq!(r.income, Decimal::ZERO);
    assert_eq!(r.expense, Decimal::ZERO);
    assert_eq!(r.balance, Decimal::ZERO);
    assert_eq!(r.savings, Decimal::ZERO);
    // Outstanding debts are not tied to a month.
    assert_eq!(r.payable, dec(800));
}

#[test]
fn report_is_idempotent_and_balanced() {
    let mut l = Ledger::new(MemoryStore::new());
    march(&mut l);
    add_tx(&mut l, 12345, EntryType::Expense, "2024-03-31T23:59:59", None);
    let a = l.monthly_report("2024-03").unwrap();
    let b = l.monthly_report("2024-03").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.balance, a.income - a.expense);
    assert_eq!(a.expense, dec(12845));
}

#[test]
fn deleting_a_transaction_only_moves_its_own_month() {
    let mut l = Ledger::new(MemoryStore::new());
    let (_, lunch, _) = march(&mut l);
    add_tx(&mut l, 700, EntryType::Expense, "2024-04-02", None);
    let april_before = l.monthly_report("2024-04").unwrap();

    l.delete_transaction(lunch).unwrap();

    let march_after = l.monthly_report("2024-03").unwrap();
    assert_eq!(march_after.expense, Decimal::ZERO);
    assert_eq!(march_after.balance, dec(50000));
    assert_eq!(l.monthly_report("2024-04").unwrap(), april_before);
}

#[test]
fn moving_a_transaction_updates_both_months() {
    let mut l = Ledger::new(MemoryStore::new());
    let (_, lunch, _) = march(&mut l);
    l.update_transaction(
        lunch,
        hisabkitab::models::TransactionPatch {
            date: Some(parse_timestamp("2024-04-01").unwrap()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(l.monthly_report("2024-03").unwrap().expense, Decimal::ZERO);
    assert_eq!(l.monthly_report("2024-04").unwrap().expense, dec(500));
}

#[test]
fn paid_contacts_drop_out_of_totals() {
    let mut l = Ledger::new(MemoryStore::new());
    let (_, _, rahim) = march(&mut l);
    let karim = add_contact(&mut l, "Karim", ContactType::Receivable, 300);
    let r = l.monthly_report("2024-03").unwrap();
    assert_eq!((r.payable, r.receivable), (dec(800), dec(300)));

    l.settle_contact(rahim).unwrap();
    l.pay_contact(karim, dec(300)).unwrap();
    let r = l.monthly_report("2024-03").unwrap();
    assert_eq!((r.payable, r.receivable), (dec(0), dec(0)));
}

#[test]
fn bad_month_is_rejected() {
    let l = Ledger::new(MemoryStore::new());
    assert!(matches!(l.monthly_report("2024-3"), Err(Error::InvalidMonth(_))));
    assert!(matches!(
        l.category_breakdown("March", EntryType::Expense),
        Err(Error::InvalidMonth(_))
    ));
}

#[test]
fn category_breakdown_groups_and_sorts() {
    let mut l = Ledger::new(MemoryStore::new());
    l.init().unwrap();
    let food = l.category_named("food").unwrap().unwrap().id;
    let bills = l.category_named("Bills").unwrap().unwrap().id;
    add_tx(&mut l, 300, EntryType::Expense, "2024-03-02", Some(food));
    add_tx(&mut l, 200, EntryType::Expense, "2024-03-03", Some(food));
    add_tx(&mut l, 900, EntryType::Expense, "2024-03-04", Some(bills));
    add_tx(&mut l, 50, EntryType::Expense, "2024-03-04", None);
    add_tx(&mut l, 9999, EntryType::Expense, "2024-04-04", Some(food));
    add_tx(&mut l, 1000, EntryType::Income, "2024-03-01", None);

    let rows = l.category_breakdown("2024-03", EntryType::Expense).unwrap();
    let flat: Vec<(&str, Decimal, usize)> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.total, r.count))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Bills", dec(900), 1),
            ("Food", dec(500), 2),
            (UNCATEGORIZED, dec(50), 1),
        ]
    );
    let total: Decimal = rows.iter().map(|r| r.total).sum();
    assert_eq!(total, l.monthly_report("2024-03").unwrap().expense);
}

#[test]
fn months_lists_activity_newest_first() {
    let mut l = Ledger::new(MemoryStore::new());
    march(&mut l);
    add_tx(&mut l, 10, EntryType::Expense, "2023-12-31", None);
    let months = l.months().unwrap();
    assert!(months.contains(&"2024-03".to_string()));
    assert!(months.contains(&"2023-12".to_string()));
    assert!(months.contains(&hisabkitab::calendar::current_month()));
    let mut sorted = months.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(months, sorted);
}

fn overflowing_totals<S: RecordStore>(mut l: Ledger<S>) {
    for _ in 0..2 {
        l.create_transaction(NewTransaction {
            amount: Decimal::MAX,
            r#type: EntryType::Expense,
            date: parse_timestamp("2024-03-10").unwrap(),
            category_id: None,
            payment_method: None,
            note: None,
            is_recurring: false,
        })
        .unwrap();
    }
    assert!(matches!(
        l.monthly_report("2024-03"),
        Err(Error::Validation { field: "expense", .. })
    ));
    assert!(matches!(
        l.category_breakdown("2024-03", EntryType::Expense),
        Err(Error::Validation { .. })
    ));
    // Other months are unaffected.
    assert_eq!(l.monthly_report("2024-04").unwrap().expense, Decimal::ZERO);

    for name in ["Rahim", "Karim"] {
        l.create_contact(NewContact {
            name: name.into(),
            phone: None,
            r#type: ContactType::Payable,
            amount: Decimal::MAX,
            due_date: None,
        })
        .unwrap();
    }
    assert!(matches!(
        l.monthly_report("2024-04"),
        Err(Error::Validation { field: "payable", .. })
    ));
}

#[test]
fn overflowing_totals_are_errors_memory() {
    overflowing_totals(Ledger::new(MemoryStore::new()));
}

#[test]
fn overflowing_totals_are_errors_sqlite() {
    overflowing_totals(Ledger::new(SqliteStore::open_in_memory().unwrap()));
}
