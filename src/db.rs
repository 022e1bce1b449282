// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::core::aggregate::Window;
use crate::core::tips::SavingTipLedger;
use crate::models::{
    AiReport, BudgetCategory, CategoryStyle, NotificationSettings, SavingTip, TipDifficulty,
    Transaction, TxKind,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Finsight", "finsight"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finsight.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        monthly_limit TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Presentation metadata kept out of the domain record
    CREATE TABLE IF NOT EXISTS category_styles(
        category_id INTEGER PRIMARY KEY,
        color TEXT NOT NULL,
        icon TEXT NOT NULL,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
    );

    -- Append-only: transactions are immutable once recorded
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        date TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);

    CREATE TABLE IF NOT EXISTS saving_tips(
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        difficulty TEXT NOT NULL CHECK(difficulty IN ('easy','medium','hard')),
        potential_saving TEXT NOT NULL,
        implemented INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS ai_reports(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        month TEXT NOT NULL,
        payload TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_ai_reports_user ON ai_reports(user_id, created_at);

    CREATE TABLE IF NOT EXISTS notification_prefs(
        user_id TEXT PRIMARY KEY,
        prefs TEXT NOT NULL
    );
    "#,
    )?;
    seed_tips(conn)?;
    Ok(())
}

fn seed_tips(conn: &Connection) -> Result<()> {
    for tip in SavingTipLedger::seed().tips() {
        conn.execute(
            "INSERT OR IGNORE INTO saving_tips(id, title, description, difficulty, potential_saving)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tip.id,
                tip.title,
                tip.description,
                tip.difficulty.as_str(),
                tip.potential_saving.to_string()
            ],
        )?;
    }
    Ok(())
}

/// TransactionStore range query: one user's transactions inside the
/// window, ordered by date then id ascending.
pub fn find_transactions(conn: &Connection, user_id: &str, window: &Window) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, date, kind, amount, category, description
         FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date ASC, id ASC",
    )?;
    let mut rows = stmt.query(params![
        user_id,
        window.start().to_string(),
        window.end().to_string()
    ])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let user_id: String = r.get(1)?;
        let date_s: String = r.get(2)?;
        let kind_s: String = r.get(3)?;
        let amount_s: String = r.get(4)?;
        let category: String = r.get(5)?;
        let description: Option<String> = r.get(6)?;
        out.push(Transaction {
            id,
            user_id,
            kind: crate::utils::parse_kind(&kind_s)?,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?,
            category,
            date: NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")?,
            description,
        });
    }
    Ok(out)
}

pub fn insert_transaction(
    conn: &Connection,
    user_id: &str,
    kind: TxKind,
    amount: Decimal,
    category: &str,
    date: NaiveDate,
    description: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, date, kind, amount, category, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            date.to_string(),
            kind.as_str(),
            amount.to_string(),
            category,
            description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_budget_categories(conn: &Connection) -> Result<Vec<BudgetCategory>> {
    let mut stmt =
        conn.prepare("SELECT id, name, monthly_limit FROM categories ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let limit_s: String = r.get(2)?;
        out.push(BudgetCategory {
            id,
            name,
            monthly_limit: limit_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid monthly limit '{}' in categories", limit_s))?,
        });
    }
    Ok(out)
}

pub fn category_style(conn: &Connection, category_id: i64) -> Result<Option<CategoryStyle>> {
    let style = conn
        .query_row(
            "SELECT color, icon FROM category_styles WHERE category_id=?1",
            params![category_id],
            |r| {
                Ok(CategoryStyle {
                    color: r.get(0)?,
                    icon: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(style)
}

pub fn load_tip_ledger(conn: &Connection) -> Result<SavingTipLedger> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, difficulty, potential_saving, implemented
         FROM saving_tips ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut tips = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let title: String = r.get(1)?;
        let description: String = r.get(2)?;
        let difficulty_s: String = r.get(3)?;
        let saving_s: String = r.get(4)?;
        let implemented: bool = r.get(5)?;
        tips.push(SavingTip {
            id,
            title,
            description,
            difficulty: parse_difficulty(&difficulty_s)?,
            potential_saving: saving_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid potential saving '{}' in saving_tips", saving_s))?,
            implemented,
        });
    }
    Ok(SavingTipLedger::new(tips))
}

pub fn mark_tip_implemented(conn: &Connection, tip_id: &str) -> Result<()> {
    conn.execute(
        "UPDATE saving_tips SET implemented=1 WHERE id=?1",
        params![tip_id],
    )?;
    Ok(())
}

/// Reports are append-only history; they are re-requested, never edited.
pub fn insert_report(conn: &Connection, user_id: &str, report: &AiReport) -> Result<()> {
    conn.execute(
        "INSERT INTO ai_reports(user_id, month, payload) VALUES (?1, ?2, ?3)",
        params![user_id, report.month, serde_json::to_string(report)?],
    )?;
    Ok(())
}

pub fn list_reports(conn: &Connection, user_id: &str) -> Result<Vec<(String, AiReport)>> {
    let mut stmt = conn.prepare(
        "SELECT created_at, payload FROM ai_reports WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let created_at: String = r.get(0)?;
        let payload: String = r.get(1)?;
        let report: AiReport = serde_json::from_str(&payload)
            .with_context(|| format!("Invalid report payload stored at {}", created_at))?;
        out.push((created_at, report));
    }
    Ok(out)
}

pub fn get_notification_prefs(conn: &Connection, user_id: &str) -> Result<NotificationSettings> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT prefs FROM notification_prefs WHERE user_id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => serde_json::from_str(&s)
            .with_context(|| format!("Invalid notification prefs for user '{}'", user_id)),
        None => Ok(NotificationSettings::default()),
    }
}

pub fn set_notification_prefs(
    conn: &Connection,
    user_id: &str,
    prefs: &NotificationSettings,
) -> Result<()> {
    conn.execute(
        "INSERT INTO notification_prefs(user_id, prefs) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET prefs=excluded.prefs",
        params![user_id, serde_json::to_string(prefs)?],
    )?;
    Ok(())
}

fn parse_difficulty(s: &str) -> Result<TipDifficulty> {
    match s {
        "easy" => Ok(TipDifficulty::Easy),
        "medium" => Ok(TipDifficulty::Medium),
        "hard" => Ok(TipDifficulty::Hard),
        _ => anyhow::bail!("Invalid difficulty '{}' in saving_tips", s),
    }
}
