// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::core::{aggregate, trend};
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("trends", sub)) => trends(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let user = sub.get_one::<String>("user").unwrap();

    let window = crate::utils::month_window(&month)?;
    let txs = crate::db::find_transactions(conn, user, &window)?;
    let agg = aggregate::aggregate(&txs, &window);

    if maybe_print_json(json_flag, jsonl_flag, &agg)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = agg
        .by_category
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                format!("{:.2}", s.total_spent),
                s.transaction_count.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Txns"], rows));
    println!(
        "Total expenses: {:.2}  Total income: {:.2}",
        agg.total_expense, agg.total_income
    );
    Ok(())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let user = sub.get_one::<String>("user").unwrap();

    let mut stmt = conn.prepare(
        "SELECT substr(date,1,7) AS month, kind, amount
         FROM transactions WHERE user_id=?1
         ORDER BY date DESC",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;

    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let (m, kind, amt_s) = row?;
        let amt = amt_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amt_s))?;
        let entry = map.entry(m).or_insert((Decimal::ZERO, Decimal::ZERO));
        if kind == "income" {
            entry.0 += amt;
        } else {
            entry.1 += amt;
        }
    }
    let mut data = Vec::new();
    for (m, (inc, exp)) in map.iter().rev().take(months) {
        data.push(vec![
            m.clone(),
            format!("{:.2}", inc),
            format!("{:.2}", exp),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn trends(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let top: usize = *sub.get_one::<usize>("top").unwrap_or(&3);
    let epsilon = parse_decimal(sub.get_one::<String>("epsilon").unwrap())?;
    let user = sub.get_one::<String>("user").unwrap();

    let prior_month = crate::utils::prev_month(&month)?;
    let current_window = crate::utils::month_window(&month)?;
    let prior_window = crate::utils::month_window(&prior_month)?;

    let current_txs = crate::db::find_transactions(conn, user, &current_window)?;
    let prior_txs = crate::db::find_transactions(conn, user, &prior_window)?;
    let current_agg = aggregate::aggregate(&current_txs, &current_window);
    let prior_agg = aggregate::aggregate(&prior_txs, &prior_window);

    let opts = trend::TrendOptions {
        epsilon_percent: epsilon,
        top_n: top,
    };
    let insights = trend::compare(&current_agg.by_category, &prior_agg.by_category, &opts);

    if maybe_print_json(json_flag, jsonl_flag, &insights)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = insights
        .iter()
        .map(|i| {
            let change = match i.percent_change {
                Some(p) => format!("{:.1}%", p),
                None => "-".to_string(),
            };
            vec![
                i.category.clone(),
                i.direction.to_string(),
                change,
                format!("{:.2}", i.current_total),
                format!("{:.2}", i.prior_total),
            ]
        })
        .collect();
    let cur_hdr = format!("Spent ({})", month);
    let pri_hdr = format!("Spent ({})", prior_month);
    println!(
        "{}",
        pretty_table(
            &["Category", "Direction", "Change", &cur_hdr, &pri_hdr],
            rows
        )
    );
    Ok(())
}
