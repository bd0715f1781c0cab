// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::Settings;
use billfold::services::settings::SettingsService;
use chrono::NaiveDate;
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn month_start_day_one_reduces_to_the_calendar_month() {
    let mut settings = Settings::default();
    settings.set_month_start_day(1);

    let today = d("2025-08-06");
    let (start, end) = settings.financial_month_window(today);
    assert_eq!(start, d("2025-08-01"));
    assert_eq!(end, d("2025-09-01"));

    assert!(settings.is_in_current_financial_month(d("2025-08-01"), today));
    assert!(settings.is_in_current_financial_month(d("2025-08-31"), today));
    assert!(!settings.is_in_current_financial_month(d("2025-07-31"), today));
    assert!(!settings.is_in_current_financial_month(d("2025-09-01"), today));
}

#[test]
fn window_spans_the_previous_month_before_the_start_day() {
    let mut settings = Settings::default();
    settings.set_month_start_day(25);

    // The 10th is before the 25th: the window began in the previous month.
    let today = d("2025-08-10");
    let (start, end) = settings.financial_month_window(today);
    assert_eq!(start, d("2025-07-25"));
    assert_eq!(end, d("2025-08-25"));

    assert!(settings.is_in_current_financial_month(d("2025-07-25"), today));
    assert!(settings.is_in_current_financial_month(d("2025-08-24"), today));
    // The upper bound's start day belongs to the next window.
    assert!(!settings.is_in_current_financial_month(d("2025-08-25"), today));
}

#[test]
fn window_starts_this_month_on_or_after_the_start_day() {
    let mut settings = Settings::default();
    settings.set_month_start_day(25);

    let today = d("2025-08-25");
    let (start, end) = settings.financial_month_window(today);
    assert_eq!(start, d("2025-08-25"));
    assert_eq!(end, d("2025-09-25"));
}

#[test]
fn start_day_past_the_month_length_clamps_to_its_last_day() {
    let mut settings = Settings::default();
    settings.set_month_start_day(31);

    let today = d("2025-04-30");
    let (start, end) = settings.financial_month_window(today);
    assert_eq!(start, d("2025-04-30"));
    assert_eq!(end, d("2025-05-31"));

    // February in a leap year.
    let today = d("2024-02-29");
    let (start, _) = settings.financial_month_window(today);
    assert_eq!(start, d("2024-02-29"));
}

#[test]
fn day_setters_clamp_out_of_range_input() {
    let mut settings = Settings::default();
    settings.set_month_start_day(0);
    assert_eq!(settings.month_start_day, 1);
    settings.set_month_start_day(40);
    assert_eq!(settings.month_start_day, 31);

    settings.set_budget_start_day(0);
    assert_eq!(settings.budget_start_day, 1);
    settings.set_budget_start_day(31);
    assert_eq!(settings.budget_start_day, 28);
    settings.set_budget_start_day(15);
    assert_eq!(settings.budget_start_day, 15);
}

#[test]
fn category_lists_trim_and_suppress_duplicates_preserving_order() {
    let mut settings = Settings::default();
    settings.expense_categories = vec!["Food".to_string()];

    assert!(settings.add_expense_category(" Gaming "));
    assert!(!settings.add_expense_category("Gaming"));
    assert!(!settings.add_expense_category("  Food "));
    assert!(!settings.add_expense_category("   "));
    assert_eq!(settings.expense_categories, vec!["Food", "Gaming"]);

    assert!(settings.remove_expense_category("Food"));
    assert!(!settings.remove_expense_category("Food"));
    assert_eq!(settings.expense_categories, vec!["Gaming"]);
}

#[test]
fn service_round_trips_settings_and_defaults_when_absent() {
    let dir = TempDir::new().unwrap();
    let svc = SettingsService::at(dir.path());

    // No file yet: defaults rooted at the service directory.
    let loaded = svc.load();
    assert_eq!(loaded.storage_root, dir.path());
    assert_eq!(loaded.month_start_day, 1);

    let mut edited = loaded.clone();
    edited.currency = "EUR".to_string();
    edited.set_month_start_day(25);
    edited.assistant_enabled = true;
    assert!(svc.save(&edited));

    assert_eq!(svc.load(), edited);
}
