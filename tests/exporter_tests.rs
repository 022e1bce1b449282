// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finsight::models::TxKind;
use finsight::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::insert_transaction(
        &conn,
        "default",
        TxKind::Expense,
        "12.34".parse().unwrap(),
        "Groceries",
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        Some("Weekly run"),
    )
    .unwrap();
    conn
}

fn export_matches(format: &str, out: &str) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from([
        "finsight",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    export_m.clone()
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    exporter::handle(&conn, &export_matches("json", &out_str)).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "kind": "expense",
                "amount": "12.34",
                "category": "Groceries",
                "description": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_with_header() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    exporter::handle(&conn, &export_matches("csv", &out_str)).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,kind,amount,category,description"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2025-01-02,expense,12.34,Groceries,Weekly run"
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(exporter::handle(&conn, &export_matches("xml", &out_str)).is_err());
    assert!(!out_path.exists());
}
