// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use crate::aggregate;
use crate::models::{Settings, Transaction};
use crate::services::transactions::TransactionService;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(settings, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(settings, sub)?,
        Some(("net", sub)) => net(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<usize>("months").unwrap();
    let txs = TransactionService::new(settings).get_all();

    let data: Vec<Vec<String>> = aggregate::monthly_cashflow(&txs)
        .into_iter()
        .take(months)
        .map(|(month, income, expense)| {
            vec![
                month,
                format!("{:.2}", income),
                format!("{:.2}", expense),
                format!("{:.2}", income - expense),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

/// Scope: a calendar month when given, otherwise the current financial
/// month (half-open window from Settings).
fn scoped_transactions(
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<(String, Vec<Transaction>)> {
    let svc = TransactionService::new(settings);
    if let Some(month) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(month)?;
        Ok((month.clone(), svc.get_for_month(y, m)))
    } else {
        let today = Local::now().date_naive();
        let (start, end) = settings.financial_month_window(today);
        let txs = svc
            .get_all()
            .into_iter()
            .filter(|t| settings.is_in_current_financial_month(t.date, today))
            .collect();
        Ok((format!("{}..{}", start, end), txs))
    }
}

fn spend_by_category(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (scope, txs) = scoped_transactions(settings, sub)?;
    let breakdown = aggregate::group_by_category(&txs, true);
    if maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = breakdown
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.amount, &settings.currency),
                format!("{:.1}%", c.percent),
            ]
        })
        .collect();
    println!("Spending for {}", scope);
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

fn net(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let svc = TransactionService::new(settings);
    let (scope, txs) = if let Some(month) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(month)?;
        (month.clone(), svc.get_for_month(y, m))
    } else {
        ("all time".to_string(), svc.get_all())
    };

    let income = aggregate::total_income(&txs);
    let expense = aggregate::total_expense(&txs);
    let data = vec![vec![
        scope,
        fmt_money(&income, &settings.currency),
        fmt_money(&expense, &settings.currency),
        fmt_money(&aggregate::net_amount(&txs), &settings.currency),
    ]];
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Scope", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}
