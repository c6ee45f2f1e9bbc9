// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hisabkitab::ledger::Ledger;
use hisabkitab::models::{ContactStatus, EntryType};
use hisabkitab::query::TransactionFilter;
use hisabkitab::store::SqliteStore;
use hisabkitab::{cli, commands::importer};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_ledger() -> Ledger<SqliteStore> {
    let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
    ledger.init().unwrap();
    ledger
}

fn import(ledger: &mut Ledger<SqliteStore>, path: &str, format: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["hisabkitab", "import", "--path", path, "--format", format]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(ledger, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut ledger = base_ledger();
    let file = temp_file(
        "date,type,amount,category,paymentMethod,note\n2024-02-03,EXPENSE,5.00,,,\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    import(&mut ledger, &padded, "csv").unwrap();

    let rows = ledger.list_transactions(&TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    let tx = &rows[0].transaction;
    assert_eq!(tx.month, "2024-02");
    assert_eq!(tx.payment_method, "Cash");
    assert_eq!(tx.category_id, None);
}

#[test]
fn csv_resolves_categories_and_tolerates_unknown_ones() {
    let mut ledger = base_ledger();
    let file = temp_file(
        "date,type,amount,category,paymentMethod,note\n\
         2024-03-01T09:00:00,income,50000,salary,Bank,March pay\n\
         2024-03-02,EXPENSE,120.50,Food,bKash,\"Lunch, with team\"\n\
         2024-03-03,EXPENSE,80,Pet Care,Cash,\n\
         2024-03-04,EXPENSE,10,(uncategorized),Cash,\n",
    );
    import(&mut ledger, file.path().to_str().unwrap(), "csv").unwrap();

    let rows = ledger
        .list_transactions(&TransactionFilter::month("2024-03"))
        .unwrap();
    assert_eq!(rows.len(), 4);
    let by_note = |n: &str| {
        rows.iter()
            .find(|r| r.transaction.note.as_deref() == Some(n))
            .unwrap()
    };
    let pay = by_note("March pay");
    assert_eq!(pay.transaction.r#type, EntryType::Income);
    assert_eq!(pay.category.as_ref().unwrap().name, "Salary");
    let lunch = by_note("Lunch, with team");
    assert_eq!(lunch.transaction.amount, Decimal::new(12050, 2));
    assert_eq!(lunch.transaction.payment_method, "bKash");
    assert!(
        rows.iter()
            .filter(|r| r.transaction.category_id.is_none())
            .count()
            == 2
    );

    let report = ledger.monthly_report("2024-03").unwrap();
    assert_eq!(report.expense, Decimal::new(21050, 2));
}

#[test]
fn csv_with_bad_row_imports_nothing() {
    let mut ledger = base_ledger();
    let file = temp_file(
        "date,type,amount,category,paymentMethod,note\n\
         2024-03-01,EXPENSE,10,,,\n\
         not-a-date,EXPENSE,10,,,\n",
    );
    let err = import(&mut ledger, file.path().to_str().unwrap(), "csv").unwrap_err();
    assert!(format!("{:#}", err).contains("Row 3"), "{:#}", err);
    assert!(
        ledger
            .list_transactions(&TransactionFilter::default())
            .unwrap()
            .is_empty()
    );

    let file = temp_file("date,type,amount\n2024-03-01,EXPENSE,0\n");
    assert!(import(&mut ledger, file.path().to_str().unwrap(), "csv").is_err());
}

#[test]
fn json_restores_snapshot() {
    let mut ledger = base_ledger();
    let file = temp_file(
        r#"{
            "version": 1,
            "exportDate": "2024-03-31T18:00:00.000Z",
            "transactions": [
                {"id": 7, "amount": "250", "type": "EXPENSE", "date": "2024-03-20T10:00:00",
                 "categoryId": 6, "paymentMethod": "Nagad", "note": "Rickshaw", "month": "2024-03",
                 "isRecurring": false}
            ],
            "contacts": [
                {"id": 3, "name": "Rahim", "phone": null, "type": "PAYABLE", "amount": "1000",
                 "paidAmount": "200", "status": "PARTIAL", "dueDate": null}
            ],
            "settings": {"language": "EN", "currency": "BDT", "pinEnabled": false,
                         "notificationsEnabled": false},
            "monthlyBudgets": [{"month": "2024-03", "startingBalance": "1500", "salary": "50000"}]
        }"#,
    );
    import(&mut ledger, file.path().to_str().unwrap(), "JSON").unwrap();

    let tx = ledger.get_transaction(7).unwrap();
    assert_eq!(tx.payment_method, "Nagad");
    assert_eq!(tx.category_id, Some(6));
    let c = ledger.get_contact(3).unwrap();
    assert_eq!(c.status, ContactStatus::Partial);
    assert!(!ledger.settings().unwrap().notifications_enabled);
    assert_eq!(
        ledger.budget("2024-03").unwrap().unwrap().salary,
        Decimal::from(50000)
    );
    let report = ledger.monthly_report("2024-03").unwrap();
    assert_eq!(report.expense, Decimal::from(250));
    assert_eq!(report.payable, Decimal::from(800));
}

#[test]
fn json_parse_failure_names_the_file() {
    let mut ledger = base_ledger();
    let file = temp_file("{ this is not json");
    let path = file.path().to_str().unwrap().to_string();
    let err = import(&mut ledger, &path, "json").unwrap_err();
    assert!(err.to_string().contains(&path));
}

#[test]
fn unknown_format_is_refused() {
    let mut ledger = base_ledger();
    let file = temp_file("");
    let err = import(&mut ledger, file.path().to_str().unwrap(), "ofx").unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}
