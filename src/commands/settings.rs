// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::models::{Settings, StorageFormat};
use crate::services::settings::SettingsService;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(
    store: &SettingsService,
    settings: &mut Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(settings, sub)?,
        Some(("set", sub)) => set(store, settings, sub)?,
        Some(("category", sub)) => category(store, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, settings)? {
        return Ok(());
    }
    let rows = vec![
        vec!["month_start_day".into(), settings.month_start_day.to_string()],
        vec!["currency".into(), settings.currency.clone()],
        vec!["date_format".into(), settings.date_format.clone()],
        vec![
            "theme".into(),
            if settings.dark_theme { "dark" } else { "light" }.to_string(),
        ],
        vec![
            "expense_categories".into(),
            settings.expense_categories.join(", "),
        ],
        vec![
            "income_categories".into(),
            settings.income_categories.join(", "),
        ],
        vec![
            "storage_root".into(),
            settings.storage_root.display().to_string(),
        ],
        vec!["storage_format".into(), settings.storage_format.to_string()],
        vec!["backup_enabled".into(), settings.backup_enabled.to_string()],
        vec![
            "backup_every_days".into(),
            settings.backup_every_days.to_string(),
        ],
        vec![
            "assistant_enabled".into(),
            settings.assistant_enabled.to_string(),
        ],
        vec![
            "assistant_endpoint".into(),
            settings.assistant_endpoint.clone(),
        ],
        vec!["assistant_model".into(), settings.assistant_model.clone()],
        vec!["monthly_budget".into(), settings.monthly_budget.to_string()],
        vec![
            "budget_start_day".into(),
            settings.budget_start_day.to_string(),
        ],
        vec![
            "account_balance".into(),
            settings.account_balance.to_string(),
        ],
        vec![
            "last_closed_month".into(),
            settings.last_closed_month.clone(),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(store: &SettingsService, settings: &mut Settings, sub: &clap::ArgMatches) -> Result<()> {
    let mut changed = false;

    if let Some(day) = sub.get_one::<u32>("month-start-day") {
        settings.set_month_start_day(*day);
        changed = true;
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        settings.currency = ccy.trim().to_uppercase();
        changed = true;
    }
    if let Some(fmt) = sub.get_one::<String>("date-format") {
        settings.date_format = fmt.clone();
        changed = true;
    }
    if let Some(theme) = sub.get_one::<String>("theme") {
        settings.dark_theme = theme == "dark";
        changed = true;
    }
    if let Some(fmt) = sub.get_one::<String>("storage-format") {
        settings.storage_format = fmt.parse::<StorageFormat>().map_err(|e| anyhow!(e))?;
        changed = true;
    }
    if let Some(root) = sub.get_one::<String>("storage-root") {
        settings.storage_root = PathBuf::from(root.trim());
        changed = true;
    }
    if let Some(budget) = sub.get_one::<String>("monthly-budget") {
        settings.monthly_budget = parse_decimal(budget)?;
        changed = true;
    }
    if let Some(day) = sub.get_one::<u32>("budget-start-day") {
        settings.set_budget_start_day(*day);
        changed = true;
    }
    if let Some(balance) = sub.get_one::<String>("balance") {
        settings.account_balance = parse_decimal(balance)?;
        changed = true;
    }
    if let Some(enabled) = sub.get_one::<bool>("assistant-enabled") {
        settings.assistant_enabled = *enabled;
        changed = true;
    }
    if let Some(endpoint) = sub.get_one::<String>("assistant-endpoint") {
        settings.assistant_endpoint = endpoint.trim().to_string();
        changed = true;
    }
    if let Some(model) = sub.get_one::<String>("assistant-model") {
        settings.assistant_model = model.trim().to_string();
        changed = true;
    }
    if let Some(enabled) = sub.get_one::<bool>("backup-enabled") {
        settings.backup_enabled = *enabled;
        changed = true;
    }
    if let Some(days) = sub.get_one::<u32>("backup-every-days") {
        settings.backup_every_days = *days;
        changed = true;
    }

    if !changed {
        println!("Nothing to change");
        return Ok(());
    }
    if !store.save(settings) {
        return Err(anyhow!("Failed to persist settings"));
    }
    println!("Settings updated");
    Ok(())
}

fn category(
    store: &SettingsService,
    settings: &mut Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = sub.get_one::<String>("kind").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let added = if kind == "income" {
                settings.add_income_category(name)
            } else {
                settings.add_expense_category(name)
            };
            if added {
                if !store.save(settings) {
                    return Err(anyhow!("Failed to persist settings"));
                }
                println!("Added {} category '{}'", kind, name.trim());
            } else {
                println!("Category '{}' already present or empty", name.trim());
            }
        }
        Some(("rm", sub)) => {
            let kind = sub.get_one::<String>("kind").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let removed = if kind == "income" {
                settings.remove_income_category(name)
            } else {
                settings.remove_expense_category(name)
            };
            if removed {
                if !store.save(settings) {
                    return Err(anyhow!("Failed to persist settings"));
                }
                println!("Removed {} category '{}'", kind, name.trim());
            } else {
                println!("No {} category '{}'", kind, name.trim());
            }
        }
        _ => {}
    }
    Ok(())
}
