// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;

use crate::models::{SavingGoal, Settings};
use crate::services::saving_goals::SavingGoalService;
use crate::services::settings::SettingsService;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(
    store: &SettingsService,
    settings: &mut Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(settings, sub)?,
        Some(("list", sub)) => list(settings, sub)?,
        Some(("fund", sub)) => fund(settings, sub)?,
        Some(("rollover", _)) => rollover(store, settings)?,
        Some(("rm", sub)) => rm(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = SavingGoalService::new(settings);
    let name = sub.get_one::<String>("name").unwrap().trim();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };

    let mut goal = SavingGoal::new(name, target, start);
    if let Some(monthly) = sub.get_one::<String>("monthly") {
        goal.set_monthly_contribution(parse_decimal(monthly)?);
    }
    goal.description = sub.get_one::<String>("description").cloned();
    goal.account = sub.get_one::<String>("account").cloned();
    goal.target_date = sub
        .get_one::<String>("target-date")
        .map(|s| parse_date(s))
        .transpose()?;

    let id = svc
        .add(goal)
        .ok_or_else(|| anyhow!("Failed to write saving goal storage"))?;
    println!("Goal '{}' #{} created", name, id);
    Ok(())
}

fn list(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = SavingGoalService::new(settings).get_all();
    if maybe_print_json(json_flag, jsonl_flag, &goals)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            let state = if g.is_completed() {
                "done"
            } else if g.active {
                "active"
            } else {
                "paused"
            };
            vec![
                g.id.to_string(),
                g.name.clone(),
                fmt_money(&g.current_amount, &settings.currency),
                fmt_money(&g.target_amount, &settings.currency),
                format!("{:.1}%", g.progress_percentage()),
                fmt_money(&g.monthly_contribution, &settings.currency),
                state.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Saved", "Target", "Progress", "Monthly", "State"],
            rows
        )
    );
    Ok(())
}

fn fund(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = SavingGoalService::new(settings);
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if svc.fund(id, amount) {
        println!("Funded goal {} with {}", id, fmt_money(&amount, &settings.currency));
    } else {
        println!("No goal with id {}", id);
    }
    Ok(())
}

fn rollover(store: &SettingsService, settings: &mut Settings) -> Result<()> {
    let today = Local::now().date_naive();
    let label = settings
        .financial_month_start(today)
        .format("%Y-%m")
        .to_string();
    if settings.last_closed_month == label {
        println!("Financial month {} already closed", label);
        return Ok(());
    }
    let svc = SavingGoalService::new(settings);
    let funded = svc
        .apply_monthly_contributions()
        .ok_or_else(|| anyhow!("Failed to write saving goal storage"))?;
    settings.last_closed_month = label.clone();
    if !store.save(settings) {
        return Err(anyhow!("Failed to persist settings"));
    }
    println!(
        "Closed financial month {}: applied contributions to {} goal(s)",
        label, funded
    );
    Ok(())
}

fn rm(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = SavingGoalService::new(settings);
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    if svc.delete(id) {
        println!("Removed goal {}", id);
    } else {
        println!("No goal with id {}", id);
    }
    Ok(())
}
