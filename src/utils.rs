// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::core::aggregate::Window;
use crate::models::TxKind;

const UA: &str = concat!(
    "finsight/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/finsight)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Transaction amounts are magnitudes; the sign lives in the kind.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        anyhow::bail!("Amount '{}' must be non-negative", s);
    }
    Ok(d)
}

pub fn parse_kind(s: &str) -> Result<TxKind> {
    match s.trim().to_lowercase().as_str() {
        "income" => Ok(TxKind::Income),
        "expense" => Ok(TxKind::Expense),
        _ => anyhow::bail!("Invalid kind '{}', expected income|expense", s),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn month_start(month: &str) -> Result<NaiveDate> {
    parse_date(&format!("{}-01", month))
}

pub fn month_end(month: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("Invalid month '{}'", month));
    }
    let y: i32 = parts[0].parse()?;
    let m: u32 = parts[1].parse()?;
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if chrono::NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow::anyhow!("Invalid month number {}", m)),
    };
    NaiveDate::from_ymd_opt(y, m, last_day)
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))
}

/// Whole calendar month as an aggregation window.
pub fn month_window(month: &str) -> Result<Window> {
    let w = Window::new(month_start(month)?, month_end(month)?)?;
    Ok(w)
}

pub fn prev_month(month: &str) -> Result<String> {
    let start = month_start(month)?;
    let (y, m) = if start.month() == 1 {
        (start.year() - 1, 12)
    } else {
        (start.year(), start.month() - 1)
    };
    Ok(format!("{:04}-{:02}", y, m))
}

pub fn next_month(month: &str) -> Result<String> {
    let start = month_start(month)?;
    let (y, m) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    Ok(format!("{:04}-{:02}", y, m))
}

pub fn current_month() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m").to_string()
}

// Analysis endpoint settings
pub fn get_ai_endpoint(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='ai_endpoint'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.or_else(|| std::env::var("FINSIGHT_AI_ENDPOINT").ok()))
}

pub fn set_ai_endpoint(conn: &Connection, endpoint: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('ai_endpoint', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![endpoint],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
