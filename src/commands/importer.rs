// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;

use crate::classify::SignConvention;
use crate::models::Settings;
use crate::services::transactions::TransactionService;
use crate::utils::{parse_date, parse_decimal};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(settings, sub),
        _ => Ok(()),
    }
}

fn import_transactions(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let convention = match sub.get_one::<String>("convention").unwrap().as_str() {
        "positive" => SignConvention::PositiveIsExpense,
        _ => SignConvention::NegativeIsExpense,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    // Parse everything before appending anything: a bad row aborts the
    // whole import rather than leaving half of the file behind.
    let mut rows: Vec<(NaiveDate, Decimal, String, Option<String>)> = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim().to_string();
        let description = rec.get(1).context("description missing")?.trim().to_string();
        let amount_raw = rec.get(2).context("amount missing")?.trim().to_string();
        let category = rec
            .get(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let date = parse_date(&date_raw)
            .with_context(|| format!("Invalid transaction date '{}'", date_raw))?;
        let amount = parse_decimal(&amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, description))?;
        rows.push((date, amount, description, category));
    }

    let svc = TransactionService::new(settings);
    let mut imported = 0usize;
    for (date, amount, description, category) in rows {
        let is_expense = convention.is_expense(amount);
        svc.import_row(date, amount, &description, category.as_deref(), is_expense)
            .ok_or_else(|| anyhow!("Failed to write transaction storage"))?;
        imported += 1;
    }
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
