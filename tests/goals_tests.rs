// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::{SavingGoal, Settings};
use billfold::services::saving_goals::SavingGoalService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn settings_at(dir: &TempDir) -> Settings {
    let mut s = Settings::default();
    s.storage_root = dir.path().to_path_buf();
    s
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

#[test]
fn negative_target_is_clamped_to_zero_not_rejected() {
    let mut goal = SavingGoal::new("Trip", Decimal::from(-5), start());
    assert_eq!(goal.target_amount, Decimal::ZERO);

    goal.set_target_amount(Decimal::from(100));
    assert_eq!(goal.target_amount, Decimal::from(100));
    goal.set_target_amount(Decimal::from(-5));
    assert_eq!(goal.target_amount, Decimal::ZERO);

    goal.set_monthly_contribution(Decimal::from(-20));
    assert_eq!(goal.monthly_contribution, Decimal::ZERO);
}

#[test]
fn progress_is_zero_for_a_zero_target_never_nan() {
    let goal = SavingGoal::new("Nothing", Decimal::ZERO, start());
    let pct = goal.progress_percentage();
    assert_eq!(pct, 0.0);
    assert!(pct.is_finite());
}

#[test]
fn progress_clamps_to_the_unit_range() {
    let mut goal = SavingGoal::new("Trip", Decimal::from(200), start());
    goal.current_amount = Decimal::from(50);
    assert!((goal.progress_percentage() - 25.0).abs() < 1e-9);

    // Overfunded and overdrawn amounts stay unclamped; the percentage does not.
    goal.current_amount = Decimal::from(500);
    assert_eq!(goal.progress_percentage(), 100.0);
    goal.current_amount = Decimal::from(-40);
    assert_eq!(goal.progress_percentage(), 0.0);
}

#[test]
fn remaining_and_completed_derive_from_target_and_current() {
    let mut goal = SavingGoal::new("Trip", Decimal::from(200), start());
    goal.current_amount = Decimal::from(150);
    assert_eq!(goal.remaining_amount(), Decimal::from(50));
    assert!(!goal.is_completed());

    goal.current_amount = Decimal::from(250);
    assert_eq!(goal.remaining_amount(), Decimal::ZERO);
    assert!(goal.is_completed());

    // A zero target is never "completed".
    let zero = SavingGoal::new("Zero", Decimal::ZERO, start());
    assert!(!zero.is_completed());
}

#[test]
fn fund_adds_to_the_current_amount() {
    let dir = TempDir::new().unwrap();
    let svc = SavingGoalService::new(&settings_at(&dir));
    let id = svc.add(SavingGoal::new("Trip", Decimal::from(500), start())).unwrap();

    assert!(svc.fund(id, Decimal::from(120)));
    assert!(svc.fund(id, Decimal::from(-20)));
    assert!(!svc.fund(999, Decimal::from(1)));

    let goal = svc.get_all().into_iter().find(|g| g.id == id).unwrap();
    assert_eq!(goal.current_amount, Decimal::from(100));
}

#[test]
fn monthly_contributions_apply_to_active_funded_goals_only() {
    let dir = TempDir::new().unwrap();
    let svc = SavingGoalService::new(&settings_at(&dir));

    let mut active = SavingGoal::new("Active", Decimal::from(500), start());
    active.set_monthly_contribution(Decimal::from(50));
    let active_id = svc.add(active).unwrap();

    let mut paused = SavingGoal::new("Paused", Decimal::from(500), start());
    paused.set_monthly_contribution(Decimal::from(50));
    paused.active = false;
    let paused_id = svc.add(paused).unwrap();

    svc.add(SavingGoal::new("No contribution", Decimal::from(500), start()))
        .unwrap();

    assert_eq!(svc.apply_monthly_contributions(), Some(1));

    let goals = svc.get_all();
    let by_id = |id: i64| goals.iter().find(|g| g.id == id).unwrap().clone();
    assert_eq!(by_id(active_id).current_amount, Decimal::from(50));
    assert_eq!(by_id(paused_id).current_amount, Decimal::ZERO);
}

#[test]
fn active_goals_list_before_inactive_ones() {
    let dir = TempDir::new().unwrap();
    let svc = SavingGoalService::new(&settings_at(&dir));

    let mut paused = SavingGoal::new("Aardvark", Decimal::from(10), start());
    paused.active = false;
    svc.add(paused).unwrap();
    svc.add(SavingGoal::new("Zebra", Decimal::from(10), start())).unwrap();

    let names: Vec<String> = svc.get_all().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["Zebra", "Aardvark"]);
}
