// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .default_value("default")
        .help("Profile the command applies to")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("finsight")
        .about("Personal finance insights: budgets, spending trends, and AI analysis")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("desc").long("desc"))
                        .arg(user_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage budget categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("limit").long("limit").default_value("0"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Set limits and track budget status")
                .subcommand(
                    Command::new("set")
                        .about("Set a category's monthly limit")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(Command::new("list").about("List monthly limits"))
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Spent vs limit per category for a month")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(
                            Arg::new("cap")
                                .long("cap")
                                .default_value("100")
                                .help("Display ceiling for percent used"),
                        )
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Spending rollups and trends")
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expense totals per category for a month")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income vs expense")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .default_value("12"),
                        )
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("trends")
                        .about("Largest category movers vs the prior month")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize))
                                .default_value("3"),
                        )
                        .arg(
                            Arg::new("epsilon")
                                .long("epsilon")
                                .default_value("1")
                                .help("Percent band treated as flat"),
                        )
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("tips")
                .about("Saving tips and implementation progress")
                .subcommand(json_flags(Command::new("list").about("List the tip catalog")))
                .subcommand(
                    Command::new("implement")
                        .about("Mark a tip as implemented")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("summary").about("Implementation progress rollup"),
                )),
        )
        .subcommand(
            Command::new("analyze")
                .about("AI financial analysis via the configured endpoint")
                .subcommand(
                    Command::new("run")
                        .about("Generate and store a monthly analysis report")
                        .arg(Arg::new("month").long("month"))
                        .arg(
                            Arg::new("max-tx")
                                .long("max-tx")
                                .value_parser(value_parser!(usize))
                                .default_value("200")
                                .help("Cap on transactions serialized in the request"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("predict")
                        .about("Predict next month's expenses from recent history")
                        .arg(user_arg()),
                )
                .subcommand(json_flags(
                    Command::new("history")
                        .about("Stored analysis reports")
                        .arg(user_arg()),
                ))
                .subcommand(
                    Command::new("set-endpoint")
                        .about("Configure the analysis service endpoint")
                        .arg(Arg::new("url").required(true)),
                ),
        )
        .subcommand(
            Command::new("notify")
                .about("Notification preferences")
                .subcommand(json_flags(
                    Command::new("show").about("Show preferences").arg(user_arg()),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Update preferences")
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("push").long("push").value_parser(value_parser!(bool)))
                        .arg(
                            Arg::new("daily")
                                .long("daily")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("weekly")
                                .long("weekly")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("payment-reminders")
                                .long("payment-reminders")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("budget-alerts")
                                .long("budget-alerts")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("large-transactions")
                                .long("large-transactions")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("monthly-goals")
                                .long("monthly-goals")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("dnd").long("dnd").value_parser(value_parser!(bool)))
                        .arg(
                            Arg::new("emergency")
                                .long("emergency")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("large-threshold").long("large-threshold"))
                        .arg(Arg::new("daily-threshold").long("daily-threshold"))
                        .arg(Arg::new("weekly-threshold").long("weekly-threshold"))
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions to CSV or JSON")
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(user_arg()),
                ),
        )
        .subcommand(Command::new("doctor").about("Consistency checks over the local database"))
}
