// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use chrono::NaiveDate;

use super::Store;
use crate::models::{Budget, Settings};

pub struct BudgetService {
    store: Store<Budget>,
}

impl BudgetService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: Store::open(settings),
        }
    }

    /// Most recently started first.
    pub fn get_all(&self) -> Vec<Budget> {
        let mut items = self.store.load();
        items.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        items
    }

    /// The most recently started budget whose window covers `date`.
    pub fn budget_for(&self, date: NaiveDate) -> Option<Budget> {
        self.get_all().into_iter().find(|b| b.contains(date))
    }

    pub fn add(&self, budget: Budget) -> Option<i64> {
        self.store.add(budget)
    }

    pub fn update(&self, budget: &Budget) -> bool {
        self.store.update(budget)
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
