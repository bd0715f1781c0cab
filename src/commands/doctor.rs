// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::models::{Settings, StorageFormat};
use crate::services::budgets::BudgetService;
use crate::services::saving_goals::SavingGoalService;
use crate::services::special_dates::SpecialDateService;
use crate::services::transactions::TransactionService;
use crate::storage::backup_path;
use crate::utils::pretty_table;

pub fn handle(settings: &Settings) -> Result<()> {
    let mut rows = Vec::new();

    let tx = TransactionService::new(settings);
    check(&mut rows, settings, "transactions", tx.storage_path(), tx.get_all().len());
    let budgets = BudgetService::new(settings);
    check(&mut rows, settings, "budgets", budgets.storage_path(), budgets.get_all().len());
    let dates = SpecialDateService::new(settings);
    check(&mut rows, settings, "special_dates", dates.storage_path(), dates.get_all().len());
    let goals = SavingGoalService::new(settings);
    check(&mut rows, settings, "saving_goals", goals.storage_path(), goals.get_all().len());

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

fn check(
    rows: &mut Vec<Vec<String>>,
    settings: &Settings,
    kind: &str,
    path: &Path,
    loaded: usize,
) {
    if !path.exists() {
        rows.push(vec![
            "missing_file".into(),
            format!("{} ({})", kind, path.display()),
        ]);
        return;
    }

    // Rows on disk that failed to load point at corruption.
    if settings.storage_format == StorageFormat::Csv {
        if let Ok(text) = fs::read_to_string(path) {
            let raw = text.lines().filter(|l| !l.trim().is_empty()).count();
            let raw_rows = raw.saturating_sub(1);
            if raw_rows > loaded {
                rows.push(vec![
                    "dropped_rows".into(),
                    format!("{}: {} of {} rows unreadable", kind, raw_rows - loaded, raw_rows),
                ]);
            }
        }
    }

    if settings.backup_enabled && !backup_path(path).exists() {
        rows.push(vec!["missing_backup".into(), kind.to_string()]);
    }
}
