// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::{aggregate, budget};
use crate::utils::{id_for_category, maybe_print_json, parse_amount, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let cat_id = id_for_category(conn, cat)?;
    conn.execute(
        "UPDATE categories SET monthly_limit=?1 WHERE id=?2",
        params![amount.to_string(), cat_id],
    )?;
    println!("Budget set for {} = {} per month", cat, amount);
    Ok(())
}

fn list(conn: &Connection, _sub: &clap::ArgMatches) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT name, monthly_limit FROM categories ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, limit) = row?;
        data.push(vec![name, limit]);
    }
    println!("{}", pretty_table(&["Category", "Monthly Limit"], data));
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let cap = parse_decimal(sub.get_one::<String>("cap").unwrap())?;
    let user = sub.get_one::<String>("user").unwrap();

    let window = crate::utils::month_window(&month)?;
    let txs = crate::db::find_transactions(conn, user, &window)?;
    let agg = aggregate::aggregate(&txs, &window);
    let budgets = crate::db::list_budget_categories(conn)?;
    let report = budget::status(&agg.by_category, &budgets, cap);

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = report
        .statuses
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                format!("{:.2}", s.limit),
                format!("{:.2}", s.spent),
                format!("{:.2}", s.remaining),
                format!("{:.1}%", s.percent_used),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Spent", "Remaining", "% Used"], rows)
    );

    if !report.unbudgeted.is_empty() {
        let rows: Vec<Vec<String>> = report
            .unbudgeted
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    format!("{:.2}", s.total_spent),
                    s.transaction_count.to_string(),
                ]
            })
            .collect();
        println!("Unbudgeted spend:");
        println!("{}", pretty_table(&["Category", "Spent", "Txns"], rows));
    }
    Ok(())
}
