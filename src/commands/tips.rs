// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("implement", sub)) => implement(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = crate::db::load_tip_ledger(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &ledger.tips())? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = ledger
        .tips()
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.title.clone(),
                t.difficulty.to_string(),
                format!("{:.2}", t.potential_saving),
                (if t.implemented { "yes" } else { "no" }).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Tip", "Difficulty", "Saving/mo", "Implemented"],
            rows
        )
    );
    Ok(())
}

fn implement(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tip_id = sub.get_one::<String>("id").unwrap();
    let mut ledger = crate::db::load_tip_ledger(conn)?;
    let tip = ledger.implement(tip_id)?;
    let title = tip.title.clone();
    crate::db::mark_tip_implemented(conn, tip_id)?;
    println!("Marked '{}' as implemented", title);
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = crate::db::load_tip_ledger(conn)?;
    let s = ledger.summary();
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let rows = vec![vec![
        s.implemented_count.to_string(),
        format!("{:.2}", s.implemented_savings),
        format!("{:.2}", s.total_potential_savings),
        format!("{:.1}%", s.achieved_percent),
    ]];
    println!(
        "{}",
        pretty_table(
            &["Implemented", "Saved/mo", "Potential/mo", "Achieved"],
            rows
        )
    );
    Ok(())
}
