// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::utils::{month_day, next_month};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Always non-negative; the sign when netting comes from `is_expense`.
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub participant: Option<String>,
    pub notes: Option<String>,
    pub is_expense: bool,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        description: &str,
        category: &str,
        is_expense: bool,
    ) -> Self {
        Self {
            id: 0,
            date,
            amount: amount.abs(),
            description: description.to_string(),
            category: category.to_string(),
            participant: None,
            notes: None,
            is_expense,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        if self.is_expense { -self.amount } else { self.amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_limit: Decimal,
    /// Per-category limits; a category missing from the map has limit 0.
    pub category_limits: BTreeMap<String, Decimal>,
    pub notes: Option<String>,
}

impl Budget {
    pub fn new(name: &str, start_date: NaiveDate, end_date: NaiveDate, total_limit: Decimal) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            start_date,
            end_date: end_date.max(start_date),
            total_limit,
            category_limits: BTreeMap::new(),
            notes: None,
        }
    }

    pub fn limit_for(&self, category: &str) -> Decimal {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A calendar date with an expected spending anomaly (birthday, holiday, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub categories: Vec<String>,
    /// Signed percentage relative to a normal period.
    pub expected_impact: f64,
}

impl SpecialDate {
    pub fn new(name: &str, date: NaiveDate, description: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            date,
            description: description.to_string(),
            categories: Vec::new(),
            expected_impact: 0.0,
        }
    }

    pub fn affects(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    /// Unclamped: may be negative or exceed the target.
    pub current_amount: Decimal,
    pub monthly_contribution: Decimal,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
    pub active: bool,
    pub account: Option<String>,
}

impl SavingGoal {
    pub fn new(name: &str, target_amount: Decimal, start_date: NaiveDate) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            description: None,
            target_amount: target_amount.max(Decimal::ZERO),
            current_amount: Decimal::ZERO,
            monthly_contribution: Decimal::ZERO,
            start_date,
            target_date: None,
            active: true,
            account: None,
        }
    }

    /// Negative input is clamped to 0, not rejected.
    pub fn set_target_amount(&mut self, amount: Decimal) {
        self.target_amount = amount.max(Decimal::ZERO);
    }

    pub fn set_monthly_contribution(&mut self, amount: Decimal) {
        self.monthly_contribution = amount.max(Decimal::ZERO);
    }

    /// Progress toward the target in [0, 100]; 0 when there is no target.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 0.0;
        }
        let ratio = (self.current_amount / self.target_amount)
            .to_f64()
            .unwrap_or(0.0);
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining_amount(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_completed(&self) -> bool {
        self.target_amount > Decimal::ZERO && self.current_amount >= self.target_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    Csv,
    Json,
}

impl StorageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            StorageFormat::Csv => "csv",
            StorageFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(StorageFormat::Csv),
            "json" => Ok(StorageFormat::Json),
            other => Err(format!("Unknown storage format '{}' (use csv|json)", other)),
        }
    }
}

impl std::fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Process-wide configuration: loaded once at startup, mutated through the
/// clamping setters, persisted on change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub month_start_day: u32,
    pub currency: String,
    pub date_format: String,
    pub dark_theme: bool,
    pub expense_categories: Vec<String>,
    pub income_categories: Vec<String>,
    pub storage_root: PathBuf,
    pub storage_format: StorageFormat,
    pub backup_enabled: bool,
    pub backup_every_days: u32,
    pub assistant_enabled: bool,
    pub assistant_endpoint: String,
    pub assistant_model: String,
    pub monthly_budget: Decimal,
    pub budget_start_day: u32,
    pub account_balance: Decimal,
    /// Financial month (`YYYY-MM` of its start) already closed by the
    /// rollover job; guards against applying contributions twice.
    pub last_closed_month: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            month_start_day: 1,
            currency: "USD".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            dark_theme: false,
            expense_categories: [
                "Food", "Dining", "Transport", "Housing", "Utilities", "Health",
                "Entertainment", "Shopping", "Other",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            income_categories: ["Salary", "Investments", "Gifts", "Other"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            storage_root: PathBuf::new(),
            storage_format: StorageFormat::Csv,
            backup_enabled: true,
            backup_every_days: 7,
            assistant_enabled: false,
            assistant_endpoint: "http://localhost:11434/api/generate".to_string(),
            assistant_model: "llama3.2".to_string(),
            monthly_budget: Decimal::ZERO,
            budget_start_day: 1,
            account_balance: Decimal::ZERO,
            last_closed_month: String::new(),
        }
    }
}

impl Settings {
    /// Day-of-month the financial month begins on, clamped to 1..=31.
    pub fn set_month_start_day(&mut self, day: u32) {
        self.month_start_day = day.clamp(1, 31);
    }

    /// Clamped to 1..=28 so every month has the day.
    pub fn set_budget_start_day(&mut self, day: u32) {
        self.budget_start_day = day.clamp(1, 28);
    }

    pub fn add_expense_category(&mut self, name: &str) -> bool {
        add_category(&mut self.expense_categories, name)
    }

    pub fn add_income_category(&mut self, name: &str) -> bool {
        add_category(&mut self.income_categories, name)
    }

    pub fn remove_expense_category(&mut self, name: &str) -> bool {
        remove_category(&mut self.expense_categories, name)
    }

    pub fn remove_income_category(&mut self, name: &str) -> bool {
        remove_category(&mut self.income_categories, name)
    }

    /// Start of the financial month containing `today`: `today` with its day
    /// set to `month_start_day` when that day has passed, otherwise the same
    /// day in the month before. The start day is clamped to the month length.
    pub fn financial_month_start(&self, today: NaiveDate) -> NaiveDate {
        let pivot = month_day(today.year(), today.month(), self.month_start_day);
        if today.day() >= pivot.day() {
            pivot
        } else {
            let (y, m) = crate::utils::prev_month(today.year(), today.month());
            month_day(y, m, self.month_start_day)
        }
    }

    /// Half-open window `[start, start + 1 month)`.
    pub fn financial_month_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.financial_month_start(today);
        let (y, m) = next_month(start.year(), start.month());
        (start, month_day(y, m, self.month_start_day))
    }

    pub fn is_in_current_financial_month(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.financial_month_window(today);
        date >= start && date < end
    }
}

fn add_category(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || list.iter().any(|c| c == name) {
        return false;
    }
    list.push(name.to_string());
    true
}

fn remove_category(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    let before = list.len();
    list.retain(|c| c != name);
    list.len() < before
}
