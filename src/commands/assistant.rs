// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;

use crate::assistant::{self, HttpGenerator, Snapshot};
use crate::models::Settings;
use crate::services::transactions::TransactionService;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => ask(settings, sub),
        _ => Ok(()),
    }
}

fn ask(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    if !settings.assistant_enabled {
        println!("Assistant is disabled; enable it with `billfold settings set --assistant-enabled true`");
        return Ok(());
    }
    let question = sub.get_one::<String>("question").unwrap();
    let timeout = *sub.get_one::<u64>("timeout-secs").unwrap();

    let all = TransactionService::new(settings).get_all();
    let today = Local::now().date_naive();
    let current: Vec<_> = all
        .iter()
        .filter(|t| settings.is_in_current_financial_month(t.date, today))
        .cloned()
        .collect();
    let snapshots = [
        Snapshot::over(&current, "current financial month"),
        Snapshot::over(&all, "all time"),
    ];

    let generator =
        HttpGenerator::from_settings(settings).with_timeout(Duration::from_secs(timeout));
    println!(
        "{}",
        assistant::ask(&generator, &snapshots, &settings.currency, question)
    );
    Ok(())
}
