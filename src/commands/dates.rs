// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;

use crate::models::{Settings, SpecialDate};
use crate::services::special_dates::SpecialDateService;
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(settings, sub)?,
        Some(("list", sub)) => {
            let dates = SpecialDateService::new(settings).get_all();
            print_dates(&dates, sub)?;
        }
        Some(("upcoming", sub)) => {
            let days = *sub.get_one::<u64>("days").unwrap();
            let dates = SpecialDateService::new(settings).upcoming(Local::now().date_naive(), days);
            print_dates(&dates, sub)?;
        }
        Some(("rm", sub)) => rm(settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = SpecialDateService::new(settings);
    let name = sub.get_one::<String>("name").unwrap().trim();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.as_str())
        .unwrap_or_default();

    let mut special = SpecialDate::new(name, date, description);
    if let Some(categories) = sub.get_many::<String>("category") {
        for c in categories {
            let c = c.trim();
            if !c.is_empty() && !special.affects(c) {
                special.categories.push(c.to_string());
            }
        }
    }
    if let Some(impact) = sub.get_one::<String>("impact") {
        special.expected_impact = impact
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow!("Invalid impact '{}', expected a percentage", impact))?;
    }

    let id = svc
        .add(special)
        .ok_or_else(|| anyhow!("Failed to write special date storage"))?;
    println!("Special date '{}' #{} on {}", name, id, date);
    Ok(())
}

fn print_dates(dates: &[SpecialDate], sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &dates)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = dates
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.date.to_string(),
                d.name.clone(),
                d.categories.join(", "),
                format!("{:+.0}%", d.expected_impact),
                d.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Name", "Categories", "Impact", "Description"],
            rows
        )
    );
    Ok(())
}

fn rm(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let svc = SpecialDateService::new(settings);
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    if svc.delete(id) {
        println!("Removed special date {}", id);
    } else {
        println!("No special date with id {}", id);
    }
    Ok(())
}
