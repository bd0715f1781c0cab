// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::{Settings, StorageFormat, Transaction};
use billfold::services::transactions::TransactionService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use tempfile::TempDir;

fn settings_at(dir: &TempDir) -> Settings {
    let mut s = Settings::default();
    s.storage_root = dir.path().to_path_buf();
    s
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(date: &str, amount: i64, desc: &str, cat: &str, expense: bool) -> Transaction {
    Transaction::new(d(date), Decimal::from(amount), desc, cat, expense)
}

#[test]
fn get_all_sorts_newest_first() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2025-01-02", 10, "A", "Food", true)).unwrap();
    svc.add(tx("2025-03-01", 20, "B", "Food", true)).unwrap();
    svc.add(tx("2025-02-10", 30, "C", "Food", true)).unwrap();

    let dates: Vec<String> = svc.get_all().iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-02-10", "2025-01-02"]);
}

#[test]
fn same_day_entries_list_latest_id_first() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2025-01-02", 10, "first", "Food", true)).unwrap();
    svc.add(tx("2025-01-02", 20, "second", "Food", true)).unwrap();

    let all = svc.get_all();
    assert_eq!(all[0].description, "second");
    assert_eq!(all[1].description, "first");
}

#[test]
fn add_assigns_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    assert_eq!(svc.add(tx("2025-01-01", 1, "a", "Food", true)), Some(1));
    assert_eq!(svc.add(tx("2025-01-02", 2, "b", "Food", true)), Some(2));
    svc.delete(1);
    // Ids never shrink below the current maximum.
    assert_eq!(svc.add(tx("2025-01-03", 3, "c", "Food", true)), Some(3));
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2025-01-31", 1, "before", "Food", true)).unwrap();
    svc.add(tx("2025-02-01", 2, "start", "Food", true)).unwrap();
    svc.add(tx("2025-02-15", 3, "middle", "Food", true)).unwrap();
    svc.add(tx("2025-02-28", 4, "end", "Food", true)).unwrap();
    svc.add(tx("2025-03-01", 5, "after", "Food", true)).unwrap();

    let hits = svc.get_for_date_range(d("2025-02-01"), d("2025-02-28"));
    let descs: Vec<&str> = hits.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["end", "middle", "start"]);

    assert!(svc.get_for_date_range(d("2030-01-01"), d("2030-12-31")).is_empty());
}

#[test]
fn month_query_equals_range_query_in_a_leap_february() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2024-01-31", 1, "jan", "Food", true)).unwrap();
    svc.add(tx("2024-02-01", 2, "feb first", "Food", true)).unwrap();
    svc.add(tx("2024-02-29", 3, "leap day", "Food", true)).unwrap();
    svc.add(tx("2024-03-01", 4, "mar", "Food", true)).unwrap();

    let by_month = svc.get_for_month(2024, 2);
    let by_range = svc.get_for_date_range(d("2024-02-01"), d("2024-02-29"));
    assert_eq!(by_month, by_range);
    assert_eq!(by_month.len(), 2);
}

#[test]
fn update_on_absent_id_fails_and_leaves_the_file_untouched() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2025-01-01", 1, "keep", "Food", true)).unwrap();
    let before = fs::read(svc.storage_path()).unwrap();

    let mut ghost = tx("2025-01-02", 2, "ghost", "Food", true);
    ghost.id = 999;
    assert!(!svc.update(&ghost));
    assert_eq!(fs::read(svc.storage_path()).unwrap(), before);
}

#[test]
fn delete_on_absent_id_fails_and_leaves_the_file_untouched() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.add(tx("2025-01-01", 1, "keep", "Food", true)).unwrap();
    let before = fs::read(svc.storage_path()).unwrap();

    assert!(!svc.delete(999));
    assert_eq!(fs::read(svc.storage_path()).unwrap(), before);
}

#[test]
fn update_replaces_the_matching_entry() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    let id = svc.add(tx("2025-01-01", 10, "old", "Food", true)).unwrap();

    let mut edited = tx("2025-01-01", 12, "new description", "Dining", true);
    edited.id = id;
    assert!(svc.update(&edited));

    let all = svc.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "new description");
    assert_eq!(all[0].amount, Decimal::from(12));
}

#[test]
fn import_row_classifies_a_missing_category() {
    let dir = TempDir::new().unwrap();
    let svc = TransactionService::new(&settings_at(&dir));
    svc.import_row(d("2025-04-01"), Decimal::from(-42), "Grocery run", None, true)
        .unwrap();
    svc.import_row(d("2025-04-02"), Decimal::from(9), "Whatever shop", Some("Gifts"), true)
        .unwrap();

    let all = svc.get_all();
    assert_eq!(all[1].category, "Food");
    // Stored magnitude is non-negative regardless of the raw sign.
    assert_eq!(all[1].amount, Decimal::from(42));
    assert!(all[1].is_expense);
    // A caller-supplied category wins over the classifier.
    assert_eq!(all[0].category, "Gifts");
}

#[test]
fn both_backends_expose_identical_service_behavior() {
    let dir_csv = TempDir::new().unwrap();
    let dir_json = TempDir::new().unwrap();
    let mut s_csv = settings_at(&dir_csv);
    s_csv.storage_format = StorageFormat::Csv;
    let mut s_json = settings_at(&dir_json);
    s_json.storage_format = StorageFormat::Json;

    for settings in [&s_csv, &s_json] {
        let svc = TransactionService::new(settings);
        svc.add(tx("2025-01-02", 10, "A", "Food", true)).unwrap();
        svc.add(tx("2025-02-02", 20, "B", "Salary", false)).unwrap();
        assert!(!svc.delete(99));
    }

    let csv_all = TransactionService::new(&s_csv).get_all();
    let json_all = TransactionService::new(&s_json).get_all();
    assert_eq!(csv_all, json_all);
}
