// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::aggregate;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions with a blank category (they roll into 'Other')
    let blank: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE trim(category)=''",
        [],
        |r| r.get(0),
    )?;
    if blank > 0 {
        rows.push(vec![
            "blank_category".into(),
            format!("{} transaction(s)", blank),
        ]);
    }

    // 2) Zero-limit categories that saw spend this month
    let month = crate::utils::current_month();
    let mut stmt = conn.prepare(
        "SELECT c.name, COUNT(t.id)
         FROM categories c
         JOIN transactions t ON t.category=c.name AND t.kind='expense'
         WHERE c.monthly_limit='0' AND substr(t.date,1,7)=?1
         GROUP BY c.name",
    )?;
    let mut cur = stmt.query(params![month])?;
    while let Some(r) = cur.next()? {
        let name: String = r.get(0)?;
        let count: i64 = r.get(1)?;
        rows.push(vec![
            "zero_limit_spend".into(),
            format!("{} ({} txns in {})", name, count, month),
        ]);
    }

    // 3) Reconciliation: per-category totals must add up to the expense total
    let window = crate::utils::month_window(&month)?;
    let mut users_stmt = conn.prepare("SELECT DISTINCT user_id FROM transactions")?;
    let users = users_stmt.query_map([], |r| r.get::<_, String>(0))?;
    for user in users {
        let user = user?;
        let agg = aggregate::aggregate(
            &crate::db::find_transactions(conn, &user, &window)?,
            &window,
        );
        let rollup: Decimal = agg.by_category.iter().map(|s| s.total_spent).sum();
        if rollup != agg.total_expense {
            rows.push(vec![
                "rollup_mismatch".into(),
                format!("{}: {} vs {}", user, rollup, agg.total_expense),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
