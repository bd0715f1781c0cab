// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rust_decimal::Decimal;

use super::Store;
use crate::models::{SavingGoal, Settings};

pub struct SavingGoalService {
    store: Store<SavingGoal>,
}

impl SavingGoalService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: Store::open(settings),
        }
    }

    /// Active goals first, then by name.
    pub fn get_all(&self) -> Vec<SavingGoal> {
        let mut items = self.store.load();
        items.sort_by(|a, b| b.active.cmp(&a.active).then(a.name.cmp(&b.name)));
        items
    }

    pub fn add(&self, goal: SavingGoal) -> Option<i64> {
        self.store.add(goal)
    }

    pub fn update(&self, goal: &SavingGoal) -> bool {
        self.store.update(goal)
    }

    pub fn delete(&self, id: i64) -> bool {
        self.store.delete(id)
    }

    /// Adds `amount` to the goal's current amount (unclamped; withdrawals
    /// are negative contributions).
    pub fn fund(&self, id: i64, amount: Decimal) -> bool {
        let Some(mut goal) = self.get_all().into_iter().find(|g| g.id == id) else {
            return false;
        };
        goal.current_amount += amount;
        self.update(&goal)
    }

    /// Applies each active goal's monthly contribution once; the caller
    /// guards against repeat runs with `Settings::last_closed_month`.
    /// Returns the number of goals funded, or `None` when the save failed.
    pub fn apply_monthly_contributions(&self) -> Option<usize> {
        let mut items = self.store.load();
        let mut funded = 0;
        for goal in items.iter_mut() {
            if goal.active && goal.monthly_contribution > Decimal::ZERO {
                goal.current_amount += goal.monthly_contribution;
                funded += 1;
            }
        }
        if funded == 0 {
            return Some(0);
        }
        if self.store.save(&items) { Some(funded) } else { None }
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
