// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ::csv::StringRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Record;
use crate::error::{Error, Result};
use crate::models::{Budget, SavingGoal, Settings, SpecialDate, StorageFormat, Transaction};

// Lists inside one cell use ';', map pairs use '='.
const LIST_SEP: char = ';';
const PAIR_SEP: char = '=';

fn field<'a>(row: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str> {
    row.get(idx)
        .map(str::trim)
        .ok_or_else(|| Error::Parse(format!("missing field '{}'", name)))
}

fn date_field(row: &StringRecord, idx: usize, name: &str) -> Result<NaiveDate> {
    let raw = field(row, idx, name)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::Parse(format!("bad date '{}' in '{}'", raw, name)))
}

fn decimal_field(row: &StringRecord, idx: usize, name: &str) -> Result<Decimal> {
    let raw = field(row, idx, name)?;
    raw.parse::<Decimal>()
        .map_err(|_| Error::Parse(format!("bad decimal '{}' in '{}'", raw, name)))
}

fn i64_field(row: &StringRecord, idx: usize, name: &str) -> Result<i64> {
    let raw = field(row, idx, name)?;
    raw.parse::<i64>()
        .map_err(|_| Error::Parse(format!("bad integer '{}' in '{}'", raw, name)))
}

fn u32_field(row: &StringRecord, idx: usize, name: &str) -> Result<u32> {
    let raw = field(row, idx, name)?;
    raw.parse::<u32>()
        .map_err(|_| Error::Parse(format!("bad integer '{}' in '{}'", raw, name)))
}

fn f64_field(row: &StringRecord, idx: usize, name: &str) -> Result<f64> {
    let raw = field(row, idx, name)?;
    raw.parse::<f64>()
        .map_err(|_| Error::Parse(format!("bad number '{}' in '{}'", raw, name)))
}

fn bool_field(row: &StringRecord, idx: usize, name: &str) -> Result<bool> {
    let raw = field(row, idx, name)?;
    raw.parse::<bool>()
        .map_err(|_| Error::Parse(format!("bad bool '{}' in '{}'", raw, name)))
}

fn opt_field(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn opt_date_field(row: &StringRecord, idx: usize, name: &str) -> Result<Option<NaiveDate>> {
    match opt_field(row, idx) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::Parse(format!("bad date '{}' in '{}'", raw, name))),
        None => Ok(None),
    }
}

fn opt_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn join_list(items: &[String]) -> String {
    items.join(&LIST_SEP.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEP)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_limits(limits: &BTreeMap<String, Decimal>) -> String {
    limits
        .iter()
        .map(|(name, amount)| format!("{}{}{}", name, PAIR_SEP, amount))
        .collect::<Vec<_>>()
        .join(&LIST_SEP.to_string())
}

fn split_limits(raw: &str) -> Result<BTreeMap<String, Decimal>> {
    let mut limits = BTreeMap::new();
    for pair in raw.split(LIST_SEP).map(str::trim).filter(|s| !s.is_empty()) {
        let (name, amount) = pair
            .split_once(PAIR_SEP)
            .ok_or_else(|| Error::Parse(format!("bad category limit '{}'", pair)))?;
        let amount = amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| Error::Parse(format!("bad category limit '{}'", pair)))?;
        limits.insert(name.trim().to_string(), amount);
    }
    Ok(limits)
}

impl Record for Transaction {
    const KIND: &'static str = "transactions";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "amount",
        "description",
        "category",
        "participant",
        "notes",
        "is_expense",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.to_string(),
            self.amount.to_string(),
            self.description.clone(),
            self.category.clone(),
            opt_cell(&self.participant),
            opt_cell(&self.notes),
            self.is_expense.to_string(),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self> {
        Ok(Self {
            id: i64_field(row, 0, "id")?,
            date: date_field(row, 1, "date")?,
            amount: decimal_field(row, 2, "amount")?,
            description: field(row, 3, "description")?.to_string(),
            category: field(row, 4, "category")?.to_string(),
            participant: opt_field(row, 5),
            notes: opt_field(row, 6),
            is_expense: bool_field(row, 7, "is_expense")?,
        })
    }

    fn normalize(&mut self) {
        self.amount = self.amount.abs();
    }
}

impl Record for Budget {
    const KIND: &'static str = "budgets";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "start_date",
        "end_date",
        "total_limit",
        "category_limits",
        "notes",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.start_date.to_string(),
            self.end_date.to_string(),
            self.total_limit.to_string(),
            join_limits(&self.category_limits),
            opt_cell(&self.notes),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self> {
        Ok(Self {
            id: i64_field(row, 0, "id")?,
            name: field(row, 1, "name")?.to_string(),
            start_date: date_field(row, 2, "start_date")?,
            end_date: date_field(row, 3, "end_date")?,
            total_limit: decimal_field(row, 4, "total_limit")?,
            category_limits: split_limits(field(row, 5, "category_limits")?)?,
            notes: opt_field(row, 6),
        })
    }

    fn normalize(&mut self) {
        self.end_date = self.end_date.max(self.start_date);
    }
}

impl Record for SpecialDate {
    const KIND: &'static str = "special_dates";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "date",
        "description",
        "categories",
        "expected_impact",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.date.to_string(),
            self.description.clone(),
            join_list(&self.categories),
            self.expected_impact.to_string(),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self> {
        Ok(Self {
            id: i64_field(row, 0, "id")?,
            name: field(row, 1, "name")?.to_string(),
            date: date_field(row, 2, "date")?,
            description: field(row, 3, "description")?.to_string(),
            categories: split_list(field(row, 4, "categories")?),
            expected_impact: f64_field(row, 5, "expected_impact")?,
        })
    }
}

impl Record for SavingGoal {
    const KIND: &'static str = "saving_goals";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "target_amount",
        "current_amount",
        "monthly_contribution",
        "start_date",
        "target_date",
        "active",
        "account",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt_cell(&self.description),
            self.target_amount.to_string(),
            self.current_amount.to_string(),
            self.monthly_contribution.to_string(),
            self.start_date.to_string(),
            self.target_date.map(|d| d.to_string()).unwrap_or_default(),
            self.active.to_string(),
            opt_cell(&self.account),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self> {
        Ok(Self {
            id: i64_field(row, 0, "id")?,
            name: field(row, 1, "name")?.to_string(),
            description: opt_field(row, 2),
            target_amount: decimal_field(row, 3, "target_amount")?,
            current_amount: decimal_field(row, 4, "current_amount")?,
            monthly_contribution: decimal_field(row, 5, "monthly_contribution")?,
            start_date: date_field(row, 6, "start_date")?,
            target_date: opt_date_field(row, 7, "target_date")?,
            active: bool_field(row, 8, "active")?,
            account: opt_field(row, 9),
        })
    }

    fn normalize(&mut self) {
        self.target_amount = self.target_amount.max(Decimal::ZERO);
        self.monthly_contribution = self.monthly_contribution.max(Decimal::ZERO);
    }
}

impl Record for Settings {
    const KIND: &'static str = "settings";
    const HEADERS: &'static [&'static str] = &[
        "month_start_day",
        "currency",
        "date_format",
        "dark_theme",
        "expense_categories",
        "income_categories",
        "storage_root",
        "storage_format",
        "backup_enabled",
        "backup_every_days",
        "assistant_enabled",
        "assistant_endpoint",
        "assistant_model",
        "monthly_budget",
        "budget_start_day",
        "account_balance",
        "last_closed_month",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.month_start_day.to_string(),
            self.currency.clone(),
            self.date_format.clone(),
            self.dark_theme.to_string(),
            join_list(&self.expense_categories),
            join_list(&self.income_categories),
            self.storage_root.display().to_string(),
            self.storage_format.to_string(),
            self.backup_enabled.to_string(),
            self.backup_every_days.to_string(),
            self.assistant_enabled.to_string(),
            self.assistant_endpoint.clone(),
            self.assistant_model.clone(),
            self.monthly_budget.to_string(),
            self.budget_start_day.to_string(),
            self.account_balance.to_string(),
            self.last_closed_month.clone(),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self> {
        let storage_format = field(row, 7, "storage_format")?
            .parse::<StorageFormat>()
            .map_err(Error::Parse)?;
        Ok(Self {
            month_start_day: u32_field(row, 0, "month_start_day")?,
            currency: field(row, 1, "currency")?.to_string(),
            date_format: field(row, 2, "date_format")?.to_string(),
            dark_theme: bool_field(row, 3, "dark_theme")?,
            expense_categories: split_list(field(row, 4, "expense_categories")?),
            income_categories: split_list(field(row, 5, "income_categories")?),
            storage_root: PathBuf::from(field(row, 6, "storage_root")?),
            storage_format,
            backup_enabled: bool_field(row, 8, "backup_enabled")?,
            backup_every_days: u32_field(row, 9, "backup_every_days")?,
            assistant_enabled: bool_field(row, 10, "assistant_enabled")?,
            assistant_endpoint: field(row, 11, "assistant_endpoint")?.to_string(),
            assistant_model: field(row, 12, "assistant_model")?.to_string(),
            monthly_budget: decimal_field(row, 13, "monthly_budget")?,
            budget_start_day: u32_field(row, 14, "budget_start_day")?,
            account_balance: decimal_field(row, 15, "account_balance")?,
            last_closed_month: field(row, 16, "last_closed_month")?.to_string(),
        })
    }

    fn normalize(&mut self) {
        self.month_start_day = self.month_start_day.clamp(1, 31);
        self.budget_start_day = self.budget_start_day.clamp(1, 28);
    }
}
