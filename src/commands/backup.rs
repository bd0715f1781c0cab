// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::Settings;
use crate::services::budgets::BudgetService;
use crate::services::saving_goals::SavingGoalService;
use crate::services::settings::SettingsService;
use crate::services::special_dates::SpecialDateService;
use crate::services::transactions::TransactionService;
use crate::utils::pretty_table;

pub fn handle(store: &SettingsService, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    if !settings.backup_enabled && !m.get_flag("force") {
        println!("Backups are disabled in settings; use --force to run anyway");
        return Ok(());
    }

    let results = vec![
        ("transactions", TransactionService::new(settings).create_backup()),
        ("budgets", BudgetService::new(settings).create_backup()),
        ("special_dates", SpecialDateService::new(settings).create_backup()),
        ("saving_goals", SavingGoalService::new(settings).create_backup()),
        ("settings", store.create_backup()),
    ];

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(kind, ok)| {
            vec![
                kind.to_string(),
                if *ok { "ok" } else { "skipped" }.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Kind", "Backup"], rows));
    Ok(())
}
