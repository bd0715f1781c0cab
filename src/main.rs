// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use billfold::services::settings::SettingsService;
use billfold::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let matches = cli::build_cli().get_matches();

    let store = SettingsService::open()?;
    let mut settings = store.load();

    match matches.subcommand() {
        Some(("init", _)) => {
            if store.save(&settings) {
                println!("Storage initialized at {}", settings.storage_root.display());
            } else {
                eprintln!("Failed to write {}", store.storage_path().display());
            }
        }
        Some(("tx", sub)) => commands::transactions::handle(&settings, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&settings, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, &mut settings, sub)?,
        Some(("dates", sub)) => commands::dates::handle(&settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&settings, sub)?,
        Some(("import", sub)) => commands::importer::handle(&settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&settings, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&store, &mut settings, sub)?,
        Some(("assistant", sub)) => commands::assistant::handle(&settings, sub)?,
        Some(("backup", sub)) => commands::backup::handle(&store, &settings, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&settings)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
