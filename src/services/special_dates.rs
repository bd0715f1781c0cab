// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use chrono::{Datelike, Days, Local, NaiveDate};

use super::Store;
use crate::models::{Settings, SpecialDate};
use crate::utils::month_bounds;

pub struct SpecialDateService {
    store: Store<SpecialDate>,
}

impl SpecialDateService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: Store::open(settings),
        }
    }

    /// Oldest first (the opposite of transactions: upcoming dates matter).
    pub fn get_all(&self) -> Vec<SpecialDate> {
        let mut items = self.store.load();
        items.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        items
    }

    /// Inclusive on both ends.
    pub fn get_for_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<SpecialDate> {
        self.get_all()
            .into_iter()
            .filter(|d| d.date >= start && d.date <= end)
            .collect()
    }

    pub fn get_for_month(&self, year: i32, month: u32) -> Vec<SpecialDate> {
        match month_bounds(year, month) {
            Some((first, last)) => self.get_for_date_range(first, last),
            None => Vec::new(),
        }
    }

    pub fn get_for_current_month(&self) -> Vec<SpecialDate> {
        let today = Local::now().date_naive();
        self.get_for_month(today.year(), today.month())
    }

    /// Dates within `days` days from `today`, inclusive.
    pub fn upcoming(&self, today: NaiveDate, days: u64) -> Vec<SpecialDate> {
        let end = today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.get_for_date_range(today, end)
    }

    pub fn add(&self, date: SpecialDate) -> Option<i64> {
        self.store.add(date)
    }

    pub fn update(&self, date: &SpecialDate) -> bool {
        self.store.update(date)
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
}
