// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .version(clap::crate_version!())
        .about("Personal finance tracker: transactions, budgets, saving goals, special dates")
        .subcommand(Command::new("init").about("Initialize settings and the data directory"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("participant").long("participant"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Record as income regardless of the amount sign"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Calendar month YYYY-MM"))
                        .arg(Arg::new("from").long("from").help("Range start YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("Range end YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage spending budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create a budget window")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("category-limit")
                                .long("category-limit")
                                .action(ArgAction::Append)
                                .help("Per-category limit as Name=Amount; repeatable"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Spending against the budget covering a date")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget by id")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage saving goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a saving goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("target")
                                .long("target")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("monthly")
                                .long("monthly")
                                .allow_hyphen_values(true)
                                .help("Monthly contribution"),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("target-date").long("target-date").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals with progress")))
                .subcommand(
                    Command::new("fund")
                        .about("Add to a goal's current amount")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(Command::new("rollover").about(
                    "Apply monthly contributions to active goals, once per financial month",
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal by id")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("dates")
                .about("Manage special dates")
                .subcommand(
                    Command::new("add")
                        .about("Record a special date")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append)
                                .help("Affected category; repeatable"),
                        )
                        .arg(
                            Arg::new("impact")
                                .long("impact")
                                .allow_hyphen_values(true)
                                .help("Expected spending impact in percent"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List special dates, oldest first")))
                .subcommand(json_flags(
                    Command::new("upcoming")
                        .about("Special dates in the next days")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(value_parser!(u64))
                                .default_value("30"),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a special date by id")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income and expense")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .default_value("12"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Category breakdown; defaults to the current financial month")
                        .arg(Arg::new("month").long("month").help("Calendar month YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("net")
                        .about("Income, expense and net")
                        .arg(Arg::new("month").long("month").help("Calendar month YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("import").about("Import records").subcommand(
                Command::new("transactions")
                    .about("Import transactions from a CSV file (date,description,amount[,category])")
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("convention")
                            .long("convention")
                            .value_parser(["negative", "positive"])
                            .default_value("negative")
                            .help("Which amount sign marks an expense"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").about("Export records").subcommand(
                Command::new("transactions")
                    .about("Export all transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show and change configuration")
                .subcommand(json_flags(Command::new("show").about("Show current settings")))
                .subcommand(
                    Command::new("set")
                        .about("Change one or more settings")
                        .arg(
                            Arg::new("month-start-day")
                                .long("month-start-day")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("date-format").long("date-format"))
                        .arg(Arg::new("theme").long("theme").value_parser(["dark", "light"]))
                        .arg(
                            Arg::new("storage-format")
                                .long("storage-format")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("storage-root").long("storage-root"))
                        .arg(Arg::new("monthly-budget").long("monthly-budget"))
                        .arg(
                            Arg::new("budget-start-day")
                                .long("budget-start-day")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .allow_hyphen_values(true)
                                .help("Overall account balance"),
                        )
                        .arg(
                            Arg::new("assistant-enabled")
                                .long("assistant-enabled")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("assistant-endpoint").long("assistant-endpoint"))
                        .arg(Arg::new("assistant-model").long("assistant-model"))
                        .arg(
                            Arg::new("backup-enabled")
                                .long("backup-enabled")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("backup-every-days")
                                .long("backup-every-days")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(
                    Command::new("category")
                        .about("Manage category lists")
                        .subcommand(
                            Command::new("add")
                                .arg(
                                    Arg::new("kind")
                                        .long("kind")
                                        .value_parser(["expense", "income"])
                                        .required(true),
                                )
                                .arg(Arg::new("name").long("name").required(true)),
                        )
                        .subcommand(
                            Command::new("rm")
                                .arg(
                                    Arg::new("kind")
                                        .long("kind")
                                        .value_parser(["expense", "income"])
                                        .required(true),
                                )
                                .arg(Arg::new("name").long("name").required(true)),
                        ),
                ),
        )
        .subcommand(
            Command::new("assistant").about("Ask the assistant").subcommand(
                Command::new("ask")
                    .about("Ask a question over a financial summary")
                    .arg(Arg::new("question").long("question").required(true))
                    .arg(
                        Arg::new("timeout-secs")
                            .long("timeout-secs")
                            .value_parser(value_parser!(u64))
                            .default_value("30"),
                    ),
            ),
        )
        .subcommand(
            Command::new("backup")
                .about("Copy every storage file to its .backup sibling")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Run even when backups are disabled in settings"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check storage health"))
}
