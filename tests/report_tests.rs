// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finsight::core::aggregate::{Window, aggregate};
use finsight::core::report::{
    AnalysisRequest, PeriodData, PredictionRequest, RequestLimits, build_analysis_request,
    build_prediction_request, validate_analysis_response, validate_prediction_response,
};
use finsight::error::CoreError;
use finsight::models::{Transaction, TxKind};
use finsight::provider::AnalysisProvider;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tx(id: i64, kind: TxKind, amount: &str, category: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        user_id: "default".to_string(),
        kind,
        amount: amount.parse().unwrap(),
        category: category.to_string(),
        date,
        description: None,
    }
}

fn july_window() -> Window {
    Window::new(d(2025, 7, 1), d(2025, 7, 31)).unwrap()
}

fn june_window() -> Window {
    Window::new(d(2025, 6, 1), d(2025, 6, 30)).unwrap()
}

#[test]
fn bounded_request_keeps_most_recent_transactions() {
    let current_txs: Vec<Transaction> = (1..=3)
        .map(|i| tx(i, TxKind::Expense, "10", "Food", d(2025, 7, i as u32)))
        .collect();
    let prior_txs: Vec<Transaction> = (4..=6)
        .map(|i| tx(i, TxKind::Expense, "10", "Food", d(2025, 6, (i - 3) as u32)))
        .collect();
    let current_agg = aggregate(&current_txs, &july_window());
    let prior_agg = aggregate(&prior_txs, &june_window());

    let request = build_analysis_request(
        &PeriodData {
            label: "2025-07",
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: "2025-06",
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &[],
        &RequestLimits {
            max_transactions: 4,
        },
    );

    assert!(request.truncated);
    assert_eq!(
        request.current.transactions.len() + request.prior.transactions.len(),
        4
    );
    // The oldest current transaction is the one dropped
    assert_eq!(request.current.transactions[0].date, d(2025, 7, 2));
    assert_eq!(request.current.transactions[1].date, d(2025, 7, 3));
}

#[test]
fn request_under_cap_is_not_truncated() {
    let current_txs = vec![tx(1, TxKind::Expense, "10", "Food", d(2025, 7, 1))];
    let prior_txs: Vec<Transaction> = Vec::new();
    let current_agg = aggregate(&current_txs, &july_window());
    let prior_agg = aggregate(&prior_txs, &june_window());
    let request = build_analysis_request(
        &PeriodData {
            label: "2025-07",
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: "2025-06",
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &[],
        &RequestLimits::default(),
    );
    assert!(!request.truncated);
    assert_eq!(request.current.transactions.len(), 1);
}

#[test]
fn request_amounts_are_rounded_to_two_decimals() {
    let current_txs = vec![tx(1, TxKind::Expense, "10.999", "Food", d(2025, 7, 1))];
    let prior_txs: Vec<Transaction> = Vec::new();
    let current_agg = aggregate(&current_txs, &july_window());
    let prior_agg = aggregate(&prior_txs, &june_window());
    let request = build_analysis_request(
        &PeriodData {
            label: "2025-07",
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: "2025-06",
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &[],
        &RequestLimits::default(),
    );
    assert_eq!(request.current.transactions[0].amount, Decimal::from(11));
    assert_eq!(request.current.total_expense, Decimal::from(11));
}

#[test]
fn categories_outside_the_vocabulary_collapse_to_other() {
    // The gym visit predates the window, so the aggregation never saw it
    let current_txs = vec![
        tx(1, TxKind::Expense, "10", "Food", d(2025, 7, 1)),
        tx(2, TxKind::Expense, "20", "Gym", d(2025, 6, 30)),
    ];
    let prior_txs: Vec<Transaction> = Vec::new();
    let current_agg = aggregate(&current_txs, &july_window());
    let prior_agg = aggregate(&prior_txs, &june_window());
    let request = build_analysis_request(
        &PeriodData {
            label: "2025-07",
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: "2025-06",
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &[],
        &RequestLimits::default(),
    );
    let categories: Vec<&str> = request
        .current
        .transactions
        .iter()
        .map(|l| l.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Other", "Food"]);
}

fn valid_report() -> Value {
    json!({
        "month": "julio",
        "totalExpenses": 420.456,
        "recommendedSavings": 80.0,
        "summary": "Spending rose versus last month.",
        "recommendations": ["Cook at home more often"],
        "risks": ["Dining out is trending upward"],
        "spendingTrends": ["Restaurants up 20%"],
        "categorySpending": {"Restaurantes": 120.0, "Otros": 300.456}
    })
}

#[test]
fn analysis_response_happy_path_normalizes_numbers() {
    let report = validate_analysis_response(&valid_report()).unwrap();
    assert_eq!(report.month, "julio");
    assert_eq!(report.total_expenses, "420.46".parse::<Decimal>().unwrap());
    assert_eq!(report.recommended_savings, Some(Decimal::from(80)));
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(
        report.category_spending["Otros"],
        "300.46".parse::<Decimal>().unwrap()
    );
    assert_eq!(report.spending_trends, vec!["Restaurants up 20%"]);
}

#[test]
fn missing_required_field_is_a_schema_violation() {
    let mut raw = valid_report();
    raw.as_object_mut().unwrap().remove("summary");
    let err = validate_analysis_response(&raw).unwrap_err();
    assert!(matches!(err, CoreError::SchemaViolation(_)));
}

#[test]
fn mistyped_field_is_a_schema_violation() {
    let mut raw = valid_report();
    raw["recommendations"] = json!("cook at home");
    let err = validate_analysis_response(&raw).unwrap_err();
    assert!(matches!(err, CoreError::SchemaViolation(_)));

    let mut raw = valid_report();
    raw["categorySpending"]["Otros"] = json!("lots");
    let err = validate_analysis_response(&raw).unwrap_err();
    assert!(matches!(err, CoreError::SchemaViolation(_)));
}

#[test]
fn non_object_response_is_rejected() {
    let err = validate_analysis_response(&json!("ok")).unwrap_err();
    assert!(matches!(err, CoreError::SchemaViolation(_)));
}

#[test]
fn report_without_actionable_content_is_a_failed_generation() {
    let mut raw = valid_report();
    raw["recommendations"] = json!([]);
    let err = validate_analysis_response(&raw).unwrap_err();
    assert!(matches!(err, CoreError::EmptyRecommendations));

    let mut raw = valid_report();
    raw["risks"] = json!([]);
    let err = validate_analysis_response(&raw).unwrap_err();
    assert!(matches!(err, CoreError::EmptyRecommendations));
}

#[test]
fn prediction_response_round_trip() {
    let raw = json!({
        "nextMonth": "agosto",
        "summary": "Expenses should hold steady.",
        "predictedExpenses": {"Comestibles": 250.0, "Transporte": 90.5}
    });
    let prediction = validate_prediction_response(&raw).unwrap();
    assert_eq!(prediction.next_month, "agosto");
    assert_eq!(prediction.predicted_expenses.len(), 2);

    let err = validate_prediction_response(&json!({"summary": "no month"})).unwrap_err();
    assert!(matches!(err, CoreError::SchemaViolation(_)));
}

struct CannedProvider {
    value: Value,
}

impl AnalysisProvider for CannedProvider {
    fn analyze(&self, _request: &AnalysisRequest) -> anyhow::Result<Value> {
        Ok(self.value.clone())
    }

    fn predict(&self, _request: &PredictionRequest) -> anyhow::Result<Value> {
        Ok(self.value.clone())
    }
}

#[test]
fn provider_round_trip_produces_a_validated_report() {
    let current_txs = vec![tx(1, TxKind::Expense, "50", "Food", d(2025, 7, 1))];
    let prior_txs = vec![tx(2, TxKind::Expense, "40", "Food", d(2025, 6, 1))];
    let current_agg = aggregate(&current_txs, &july_window());
    let prior_agg = aggregate(&prior_txs, &june_window());
    let request = build_analysis_request(
        &PeriodData {
            label: "2025-07",
            transactions: &current_txs,
            totals: &current_agg,
        },
        &PeriodData {
            label: "2025-06",
            transactions: &prior_txs,
            totals: &prior_agg,
        },
        &[],
        &RequestLimits::default(),
    );

    let provider = CannedProvider {
        value: valid_report(),
    };
    let raw = provider.analyze(&request).unwrap();
    let report = validate_analysis_response(&raw).unwrap();
    assert_eq!(report.month, "julio");

    let prediction_request =
        build_prediction_request("2025-08", &current_txs, &RequestLimits::default());
    assert_eq!(prediction_request.history.len(), 1);
}
