// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use rust_decimal::Decimal;

use crate::aggregate;
use crate::models::{Budget, Settings};
use crate::services::budgets::BudgetService;
use crate::services::transactions::TransactionService;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(settings, sub)?,
        Some(("list", sub)) => list(settings, sub)?,
        Some(("status", sub)) => status(settings, sub)?,
        Some(("rm", sub)) => rm(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = BudgetService::new(settings);
    let name = sub.get_one::<String>("name").unwrap().trim();
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;

    let mut budget = Budget::new(name, start, end, limit);
    if let Some(pairs) = sub.get_many::<String>("category-limit") {
        for pair in pairs {
            let (cat, amount) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid category limit '{}', expected Name=Amount", pair))?;
            budget
                .category_limits
                .insert(cat.trim().to_string(), parse_decimal(amount)?);
        }
    }
    budget.notes = sub.get_one::<String>("note").cloned();

    let id = svc
        .add(budget)
        .ok_or_else(|| anyhow!("Failed to write budget storage"))?;
    println!("Budget '{}' #{} set for {}..{}", name, id, start, end);
    Ok(())
}

fn list(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let svc = BudgetService::new(settings);
    let budgets = svc.get_all();
    if maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = budgets
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.name.clone(),
                b.start_date.to_string(),
                b.end_date.to_string(),
                fmt_money(&b.total_limit, &settings.currency),
                b.category_limits.len().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Start", "End", "Limit", "Categories"], rows)
    );
    Ok(())
}

fn status(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let svc = BudgetService::new(settings);
    let Some(budget) = svc.budget_for(date) else {
        println!("No budget covers {}", date);
        return Ok(());
    };

    let txs = TransactionService::new(settings)
        .get_for_date_range(budget.start_date, budget.end_date);
    let spent = aggregate::group_by_category(&txs, true);

    // Budgeted categories first, then unbudgeted spending (limit 0).
    let mut rows = Vec::new();
    for (category, limit) in &budget.category_limits {
        let used = spent
            .iter()
            .find(|c| &c.category == category)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO);
        rows.push(vec![
            category.clone(),
            fmt_money(limit, &settings.currency),
            fmt_money(&used, &settings.currency),
            fmt_money(&(*limit - used), &settings.currency),
        ]);
    }
    for entry in &spent {
        if !budget.category_limits.contains_key(&entry.category) {
            rows.push(vec![
                entry.category.clone(),
                fmt_money(&Decimal::ZERO, &settings.currency),
                fmt_money(&entry.amount, &settings.currency),
                fmt_money(&-entry.amount, &settings.currency),
            ]);
        }
    }
    if maybe_print_json(json_flag, jsonl_flag, &rows)? {
        return Ok(());
    }
    println!(
        "Budget '{}' ({}..{}): limit {}, spent {}",
        budget.name,
        budget.start_date,
        budget.end_date,
        fmt_money(&budget.total_limit, &settings.currency),
        fmt_money(&aggregate::total_expense(&txs), &settings.currency)
    );
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Spent", "Remaining"], rows)
    );
    Ok(())
}

fn rm(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = BudgetService::new(settings);
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    if svc.delete(id) {
        println!("Removed budget {}", id);
    } else {
        println!("No budget with id {}", id);
    }
    Ok(())
}
