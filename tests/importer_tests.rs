// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::Settings;
use billfold::services::transactions::TransactionService;
use billfold::{cli, commands::importer};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn settings_at(dir: &TempDir) -> Settings {
    let mut s = Settings::default();
    s.storage_root = dir.path().to_path_buf();
    s
}

fn run_import(settings: &Settings, args: &[&str]) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args.iter().copied());
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(settings, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_maps_signs_and_classifies_missing_categories() {
    let dir = TempDir::new().unwrap();
    let settings = settings_at(&dir);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,description,amount,category\n\
         2025-02-03,Corner Shop,-5.00,\n\
         2025-02-04,Salary February,3000,\n\
         2025-02-05,Grocery market,-42.50,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &settings,
        &["billfold", "import", "transactions", "--path", &path],
    )
    .unwrap();

    let all = TransactionService::new(&settings).get_all();
    assert_eq!(all.len(), 3);

    // Newest first: groceries, salary, shop.
    assert_eq!(all[0].category, "Food");
    assert!(all[0].is_expense);
    assert_eq!(all[0].amount, "42.50".parse::<Decimal>().unwrap());

    assert_eq!(all[1].category, "Salary");
    assert!(!all[1].is_expense);
    assert_eq!(all[1].amount, Decimal::from(3000));

    // No keyword matches "Corner Shop": classifier falls back.
    assert_eq!(all[2].category, "Other");
    assert!(all[2].is_expense);
    assert_eq!(all[2].amount, Decimal::from(5));
}

#[test]
fn importer_honors_the_positive_expense_convention() {
    let dir = TempDir::new().unwrap();
    let settings = settings_at(&dir);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,description,amount,category\n2025-02-03,Corner Shop,5.00,Gifts"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &settings,
        &[
            "billfold",
            "import",
            "transactions",
            "--path",
            &path,
            "--convention",
            "positive",
        ],
    )
    .unwrap();

    let all = TransactionService::new(&settings).get_all();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_expense);
    assert_eq!(all[0].category, "Gifts");
}

#[test]
fn importer_rejects_an_invalid_date_without_importing_anything() {
    let dir = TempDir::new().unwrap();
    let settings = settings_at(&dir);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,description,amount,category\n\
         2025-02-03,Fine,-5.00,\n\
         2025-13-03,Broken,-5.00,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let err = run_import(
        &settings,
        &["billfold", "import", "transactions", "--path", &path],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid transaction date '2025-13-03'"));

    assert!(TransactionService::new(&settings).get_all().is_empty());
}

#[test]
fn importer_rejects_an_invalid_amount() {
    let dir = TempDir::new().unwrap();
    let settings = settings_at(&dir);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,description,amount,category\n2025-02-03,Shop,abc,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let err = run_import(
        &settings,
        &["billfold", "import", "transactions", "--path", &path],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid amount 'abc' for Shop"));
    assert!(TransactionService::new(&settings).get_all().is_empty());
}
