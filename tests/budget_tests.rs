// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::{Budget, Settings};
use billfold::services::budgets::BudgetService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn settings_at(dir: &TempDir) -> Settings {
    let mut s = Settings::default();
    s.storage_root = dir.path().to_path_buf();
    s
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn missing_category_has_limit_zero() {
    let mut budget = Budget::new("August", d("2025-08-01"), d("2025-08-31"), Decimal::from(900));
    budget
        .category_limits
        .insert("Food".to_string(), Decimal::from(300));

    assert_eq!(budget.limit_for("Food"), Decimal::from(300));
    assert_eq!(budget.limit_for("Transport"), Decimal::ZERO);
}

#[test]
fn reversed_window_clamps_end_to_start() {
    let budget = Budget::new("Odd", d("2025-08-10"), d("2025-08-01"), Decimal::from(100));
    assert_eq!(budget.end_date, d("2025-08-10"));
    assert!(budget.contains(d("2025-08-10")));
    assert!(!budget.contains(d("2025-08-09")));
}

#[test]
fn budget_for_prefers_the_most_recently_started_window() {
    let dir = TempDir::new().unwrap();
    let svc = BudgetService::new(&settings_at(&dir));
    svc.add(Budget::new("Quarter", d("2025-07-01"), d("2025-09-30"), Decimal::from(3000)))
        .unwrap();
    svc.add(Budget::new("August", d("2025-08-01"), d("2025-08-31"), Decimal::from(900)))
        .unwrap();

    assert_eq!(svc.budget_for(d("2025-08-15")).unwrap().name, "August");
    assert_eq!(svc.budget_for(d("2025-07-15")).unwrap().name, "Quarter");
    assert!(svc.budget_for(d("2025-10-15")).is_none());
}

#[test]
fn category_limits_survive_the_flat_backend() {
    let dir = TempDir::new().unwrap();
    let svc = BudgetService::new(&settings_at(&dir));
    let mut budget = Budget::new("August", d("2025-08-01"), d("2025-08-31"), Decimal::from(900));
    budget
        .category_limits
        .insert("Food".to_string(), Decimal::from(300));
    budget
        .category_limits
        .insert("Transport".to_string(), "80.50".parse().unwrap());
    let id = svc.add(budget).unwrap();

    let loaded = svc.get_all().into_iter().find(|b| b.id == id).unwrap();
    assert_eq!(loaded.limit_for("Food"), Decimal::from(300));
    assert_eq!(loaded.limit_for("Transport"), "80.50".parse().unwrap());
}

#[test]
fn mutations_on_absent_ids_report_failure() {
    let dir = TempDir::new().unwrap();
    let svc = BudgetService::new(&settings_at(&dir));
    let mut ghost = Budget::new("Ghost", d("2025-08-01"), d("2025-08-31"), Decimal::from(1));
    ghost.id = 42;
    assert!(!svc.update(&ghost));
    assert!(!svc.delete(42));
}
