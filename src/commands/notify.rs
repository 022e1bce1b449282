// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use regex::Regex;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let prefs = crate::db::get_notification_prefs(conn, user)?;
    if maybe_print_json(json_flag, jsonl_flag, &prefs)? {
        return Ok(());
    }
    let on_off = |b: bool| (if b { "on" } else { "off" }).to_string();
    let rows = vec![
        vec!["phone".into(), prefs.phone_number.clone()],
        vec!["verified".into(), on_off(prefs.is_verified)],
        vec!["push".into(), on_off(prefs.push_enabled)],
        vec!["daily updates".into(), on_off(prefs.notifications.daily_updates)],
        vec!["weekly reports".into(), on_off(prefs.notifications.weekly_reports)],
        vec![
            "payment reminders".into(),
            on_off(prefs.notifications.payment_reminders),
        ],
        vec!["budget alerts".into(), on_off(prefs.notifications.budget_alerts)],
        vec![
            "large transactions".into(),
            on_off(prefs.notifications.large_transactions),
        ],
        vec!["monthly goals".into(), on_off(prefs.notifications.monthly_goals)],
        vec!["do not disturb".into(), on_off(prefs.dnd_enabled)],
        vec!["emergency alerts".into(), on_off(prefs.emergency_alerts)],
        vec![
            "large tx threshold".into(),
            format!("{:.2}", prefs.thresholds.large_transaction),
        ],
        vec![
            "daily budget threshold".into(),
            format!("{:.2}", prefs.thresholds.daily_budget),
        ],
        vec![
            "weekly budget threshold".into(),
            format!("{:.2}", prefs.thresholds.weekly_budget),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let mut prefs = crate::db::get_notification_prefs(conn, user)?;

    if let Some(phone) = sub.get_one::<String>("phone") {
        let re = Regex::new(r"^\+?[0-9]{7,15}$")?;
        if !re.is_match(phone) {
            anyhow::bail!("Invalid phone number '{}', expected digits with optional +", phone);
        }
        // Changing the number invalidates any previous verification
        prefs.phone_number = phone.clone();
        prefs.is_verified = false;
    }
    if let Some(v) = sub.get_one::<bool>("push") {
        prefs.push_enabled = *v;
    }
    if let Some(v) = sub.get_one::<bool>("daily") {
        prefs.notifications.daily_updates = *v;
    }
    if let Some(v) = sub.get_one::<bool>("weekly") {
        prefs.notifications.weekly_reports = *v;
    }
    if let Some(v) = sub.get_one::<bool>("payment-reminders") {
        prefs.notifications.payment_reminders = *v;
    }
    if let Some(v) = sub.get_one::<bool>("budget-alerts") {
        prefs.notifications.budget_alerts = *v;
    }
    if let Some(v) = sub.get_one::<bool>("large-transactions") {
        prefs.notifications.large_transactions = *v;
    }
    if let Some(v) = sub.get_one::<bool>("monthly-goals") {
        prefs.notifications.monthly_goals = *v;
    }
    if let Some(v) = sub.get_one::<bool>("dnd") {
        prefs.dnd_enabled = *v;
    }
    if let Some(v) = sub.get_one::<bool>("emergency") {
        prefs.emergency_alerts = *v;
    }
    if let Some(v) = sub.get_one::<String>("large-threshold") {
        prefs.thresholds.large_transaction = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("daily-threshold") {
        prefs.thresholds.daily_budget = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("weekly-threshold") {
        prefs.thresholds.weekly_budget = parse_amount(v)?;
    }

    crate::db::set_notification_prefs(conn, user, &prefs)?;
    println!("Notification preferences updated for '{}'", user);
    Ok(())
}
