// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_kind, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let desc = sub.get_one::<String>("desc").map(|s| s.as_str());
    let user = sub.get_one::<String>("user").unwrap();

    crate::db::insert_transaction(conn, user, kind, amount, category, date, desc)?;
    println!("Recorded {} of {} in '{}' on {}", kind, amount, category, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT date, kind, amount, category, description FROM transactions WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![sub.get_one::<String>("user").unwrap().clone()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.to_lowercase());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let category: String = r.get(3)?;
        let description: Option<String> = r.get(4)?;
        data.push(TransactionRow {
            date,
            kind,
            amount,
            category,
            description: description.unwrap_or_default(),
        });
    }
    Ok(data)
}
