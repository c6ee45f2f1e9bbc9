// Copyright (c) 2025 Soumyadip Sarkar.
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
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn entry_type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense", "INCOME", "EXPENSE"])
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("Month as YYYY-MM")
}

pub fn build_cli() -> Command {
    Command::new("hisabkitab")
        .about("Monthly income/expense, savings and dena-pona ledger")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("HISABKITAB_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database and seed defaults"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(entry_type_arg().required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or timestamp, defaults to now"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("method").long("method").help("Payment method name"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(entry_type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("search").long("search").help("Search in notes"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(entry_type_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("no-category")
                                .long("no-category")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("category"),
                        )
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("saving")
                .about("Money set aside")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("purpose").long("purpose").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(Command::new("list").arg(month_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("contact")
                .about("Payables (dena) and receivables (pona)")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["payable", "receivable", "PAYABLE", "RECEIVABLE"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("due").long("due").help("Due date")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("open")
                            .long("open")
                            .action(ArgAction::SetTrue)
                            .help("Hide fully paid contacts"),
                    ),
                ))
                .subcommand(
                    Command::new("pay")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("settle").arg(id_arg()))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("paid").long("paid"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser([
                                    "pending", "partial", "paid", "PENDING", "PARTIAL", "PAID",
                                ]),
                        )
                        .arg(Arg::new("due").long("due")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(entry_type_arg().required(true))
                        .arg(Arg::new("icon").long("icon").default_value(""))
                        .arg(Arg::new("color").long("color").default_value("#6B7280"))
                        .arg(
                            Arg::new("private")
                                .long("private")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list").arg(entry_type_arg())))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("rename").long("rename").help("New category name"))
                        .arg(entry_type_arg())
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("private")
                                .long("private")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("method")
                .about("Payment methods")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value(""))
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("rename").long("rename").help("New method name"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("settings")
                .about("Language, currency, PIN and notification settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("language")
                                .long("language")
                                .value_parser(["bn", "en", "BN", "EN"]),
                        )
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("pin").long("pin"))
                        .arg(
                            Arg::new("clear-pin")
                                .long("clear-pin")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("pin"),
                        )
                        .arg(
                            Arg::new("pin-enabled")
                                .long("pin-enabled")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("notifications")
                                .long("notifications")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly starting balance and salary")
                .subcommand(
                    Command::new("set")
                        .arg(month_arg().required(true))
                        .arg(
                            Arg::new("starting-balance")
                                .long("starting-balance")
                                .default_value("0"),
                        )
                        .arg(Arg::new("salary").long("salary").default_value("0")),
                )
                .subcommand(json_flags(Command::new("show").arg(month_arg()))),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly summaries")
                .subcommand(json_flags(
                    Command::new("monthly")
                        .arg(month_arg().help("Month as YYYY-MM, defaults to current")),
                ))
                .subcommand(json_flags(Command::new("months")))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .arg(month_arg())
                        .arg(entry_type_arg().default_value("expense")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write a backup snapshot or a transactions CSV")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json (full snapshot) or csv (transactions)"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a snapshot or load transactions from CSV")
                .arg(Arg::new("path").long("path").required(true))
                .arg(Arg::new("format").long("format").default_value("json")),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all data and re-seed defaults")
                .arg(Arg::new("yes").long("yes").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
