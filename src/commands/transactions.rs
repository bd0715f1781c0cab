// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::classify::{self, SignConvention};
use crate::models::{Settings, Transaction};
use crate::services::transactions::TransactionService;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(settings, sub)?,
        Some(("list", sub)) => list(settings, sub)?,
        Some(("rm", sub)) => rm(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = TransactionService::new(settings);
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();

    // Advisory pre-fill; the explicit flag and category always win.
    let (guessed_category, guessed_expense) =
        classify::classify_or_default(description, amount, SignConvention::default());
    let is_expense = if sub.get_flag("income") {
        false
    } else {
        guessed_expense
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(guessed_category);

    let mut tx = Transaction::new(date, amount, description, &category, is_expense);
    tx.participant = sub.get_one::<String>("participant").cloned();
    tx.notes = sub.get_one::<String>("note").cloned();

    let id = svc
        .add(tx)
        .ok_or_else(|| anyhow!("Failed to write transaction storage"))?;
    println!(
        "Recorded #{}: {} on {} '{}' [{}]",
        id,
        fmt_money(&amount.abs(), &settings.currency),
        date,
        description,
        category
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub participant: String,
    pub amount: String,
    pub note: String,
}

pub fn query_rows(
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let svc = TransactionService::new(settings);
    let mut data = if let Some(month) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(month)?;
        svc.get_for_month(y, m)
    } else if sub.get_one::<String>("from").is_some() || sub.get_one::<String>("to").is_some() {
        let from = match sub.get_one::<String>("from") {
            Some(s) => parse_date(s)?,
            None => chrono::NaiveDate::MIN,
        };
        let to = match sub.get_one::<String>("to") {
            Some(s) => parse_date(s)?,
            None => chrono::NaiveDate::MAX,
        };
        svc.get_for_date_range(from, to)
    } else {
        svc.get_all()
    };

    if let Some(cat) = sub.get_one::<String>("category") {
        data.retain(|t| t.category.eq_ignore_ascii_case(cat));
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }

    Ok(data
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.format(&settings.date_format).to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            participant: t.participant.clone().unwrap_or_default(),
            amount: fmt_money(&t.signed_amount(), &settings.currency),
            note: t.notes.clone().unwrap_or_default(),
        })
        .collect())
}

fn list(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(settings, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.participant.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Participant", "Amount", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = TransactionService::new(settings);
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    if svc.delete(id) {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
