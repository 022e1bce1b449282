// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::report::{
    PeriodData, RequestLimits, build_analysis_request, build_prediction_request,
    validate_analysis_response, validate_prediction_response,
};
use crate::core::{aggregate, trend};
use crate::provider::{AnalysisProvider, HttpAnalysisProvider};
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", sub)) => run(conn, sub)?,
        Some(("predict", sub)) => predict(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        Some(("set-endpoint", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            crate::utils::set_ai_endpoint(conn, url)?;
            println!("Analysis endpoint set to {}", url);
        }
        _ => {}
    }
    Ok(())
}

fn provider_from_config(conn: &Connection) -> Result<HttpAnalysisProvider> {
    let endpoint = crate::utils::get_ai_endpoint(conn)?.context(
        "No analysis endpoint configured; run 'finsight analyze set-endpoint <url>' \
         or set FINSIGHT_AI_ENDPOINT",
    )?;
    let api_key = std::env::var("FINSIGHT_API_KEY").ok();
    Ok(HttpAnalysisProvider::new(endpoint, api_key))
}

fn run(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => crate::utils::current_month(),
    };
    let max_tx: usize = *sub.get_one::<usize>("max-tx").unwrap_or(&200);
    let user = sub.get_one::<String>("user").unwrap();

    let prior_month = crate::utils::prev_month(&month)?;
    let current_window = crate::utils::month_window(&month)?;
    let prior_window = crate::utils::month_window(&prior_month)?;

    let current_txs = crate::db::find_transactions(conn, user, &current_window)?;
    let prior_txs = crate::db::find_transactions(conn, user, &prior_window)?;
    let current_agg = aggregate::aggregate(&current_txs, &current_window);
    let prior_agg = aggregate::aggregate(&prior_txs, &prior_window);

    if current_agg.total_expense.is_zero() {
        anyhow::bail!("No expense data in {} to analyze", month);
    }

    let insights = trend::compare(
        &current_agg.by_category,
        &prior_agg.by_category,
        &trend::TrendOptions::default(),
    );
    let request = build_analysis_request(
        &PeriodData {
            label: &month,
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: &prior_month,
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &insights,
        &RequestLimits {
            max_transactions: max_tx,
        },
    );

    let provider = provider_from_config(conn)?;
    let raw = provider
        .analyze(&request)
        .context("Analysis unavailable, please try again")?;
    // All-or-nothing: nothing is persisted unless the full payload validates
    let report = validate_analysis_response(&raw)?;
    crate::db::insert_report(conn, user, &report)?;

    println!("Analysis for {}", report.month);
    println!("Total expenses: {:.2}", report.total_expenses);
    if let Some(savings) = report.recommended_savings {
        println!("Recommended savings: {:.2}", savings);
    }
    println!("{}", report.summary);
    println!("Recommendations:");
    for r in &report.recommendations {
        println!("  - {}", r);
    }
    println!("Risks:");
    for r in &report.risks {
        println!("  - {}", r);
    }
    for t in &report.spending_trends {
        println!("  * {}", t);
    }
    Ok(())
}

fn predict(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();

    let today = chrono::Utc::now().date_naive();
    let start = today
        .checked_sub_months(chrono::Months::new(3))
        .context("Date out of range")?;
    let window = aggregate::Window::new(start, today)?;
    let txs = crate::db::find_transactions(conn, user, &window)?;

    let expense_count = txs
        .iter()
        .filter(|t| t.kind == crate::models::TxKind::Expense)
        .count();
    if expense_count < 3 {
        anyhow::bail!("Not enough history to generate a prediction");
    }

    let next_month = crate::utils::next_month(&crate::utils::current_month())?;
    let request = build_prediction_request(&next_month, &txs, &RequestLimits::default());

    let provider = provider_from_config(conn)?;
    let raw = provider
        .predict(&request)
        .context("Analysis unavailable, please try again")?;
    let prediction = validate_prediction_response(&raw)?;

    println!("Predicted expenses for {}", prediction.next_month);
    println!("{}", prediction.summary);
    let rows: Vec<Vec<String>> = prediction
        .predicted_expenses
        .iter()
        .map(|(cat, amt)| vec![cat.clone(), format!("{:.2}", amt)])
        .collect();
    println!("{}", pretty_table(&["Category", "Predicted"], rows));
    let total: Decimal = prediction.predicted_expenses.values().sum();
    println!("Predicted total: {:.2}", total);
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let reports = crate::db::list_reports(conn, user)?;
    if maybe_print_json(json_flag, jsonl_flag, &reports)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|(created_at, r)| {
            let mut summary = r.summary.clone();
            if summary.chars().count() > 60 {
                summary = summary.chars().take(57).collect::<String>() + "...";
            }
            vec![
                created_at.clone(),
                r.month.clone(),
                format!("{:.2}", r.total_expenses),
                summary,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Created", "Month", "Expenses", "Summary"], rows)
    );
    Ok(())
}
