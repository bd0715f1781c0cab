// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;

use super::Store;
use crate::classify;
use crate::models::{Settings, Transaction};
use crate::utils::month_bounds;

pub struct TransactionService {
    store: Store<Transaction>,
}

impl TransactionService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: Store::open(settings),
        }
    }

    /// Newest first. Re-reads storage on every call.
    pub fn get_all(&self) -> Vec<Transaction> {
        let mut items = self.store.load();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        items
    }

    /// Inclusive on both ends.
    pub fn get_for_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        self.get_all()
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect()
    }

    pub fn get_for_month(&self, year: i32, month: u32) -> Vec<Transaction> {
        match month_bounds(year, month) {
            Some((first, last)) => self.get_for_date_range(first, last),
            None => Vec::new(),
        }
    }

    pub fn get_for_current_month(&self) -> Vec<Transaction> {
        let today = Local::now().date_naive();
        self.get_for_month(today.year(), today.month())
    }

    pub fn add(&self, transaction: Transaction) -> Option<i64> {
        self.store.add(transaction)
    }

    pub fn update(&self, transaction: &Transaction) -> bool {
        self.store.update(transaction)
    }

    pub fn delete(&self, id: i64) -> bool {
        self.store.delete(id)
    }

    pub fn create_backup(&self) -> bool {
        self.store.create_backup()
    }

    pub fn exists(&self) -> bool {
        self.store.exists()
    }

    pub fn storage_path(&self) -> &Path {
        self.store.path()
    }

    /// Import boundary: appends one already-mapped row. An absent category
    /// is pre-filled by the keyword classifier; the stored amount is the
    /// magnitude, the flag carries the sign.
    pub fn import_row(
        &self,
        date: NaiveDate,
        amount: Decimal,
        description: &str,
        category: Option<&str>,
        is_expense: bool,
    ) -> Option<i64> {
        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => c.to_string(),
            None => classify::classify(description)
                .map(|(c, _)| c.to_string())
                .unwrap_or_else(|| classify::FALLBACK_CATEGORY.to_string()),
        };
        self.add(Transaction::new(
            date,
            amount,
            description,
            &category,
            is_expense,
        ))
    }
}
