// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
            conn.execute(
                "INSERT INTO categories(name, monthly_limit) VALUES (?1, ?2)",
                params![name, limit.to_string()],
            )?;
            let color = sub.get_one::<String>("color");
            let icon = sub.get_one::<String>("icon");
            if color.is_some() || icon.is_some() {
                let cat_id = conn.last_insert_rowid();
                conn.execute(
                    "INSERT INTO category_styles(category_id, color, icon) VALUES (?1, ?2, ?3)",
                    params![
                        cat_id,
                        color.map(|s| s.as_str()).unwrap_or("slate"),
                        icon.map(|s| s.as_str()).unwrap_or("tag")
                    ],
                )?;
            }
            println!("Added category '{}' (limit {})", name, limit);
        }
        Some(("list", _)) => {
            let mut data = Vec::new();
            for cat in crate::db::list_budget_categories(conn)? {
                let style = crate::db::category_style(conn, cat.id)?;
                let (color, icon) = style.map(|s| (s.color, s.icon)).unwrap_or_default();
                data.push(vec![
                    cat.name,
                    cat.monthly_limit.to_string(),
                    color,
                    icon,
                ]);
            }
            println!(
                "{}",
                pretty_table(&["Category", "Monthly Limit", "Color", "Icon"], data)
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
