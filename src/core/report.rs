// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::core::aggregate::{Aggregation, OTHER_CATEGORY, normalize_category};
use crate::error::{CoreError, CoreResult};
use crate::models::{AiPrediction, AiReport, Transaction, TrendInsight, TxKind};

/// Bounds on the outbound payload so a busy month cannot blow up the
/// external request.
#[derive(Debug, Clone)]
pub struct RequestLimits {
    pub max_transactions: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        RequestLimits {
            max_transactions: 200,
        }
    }
}

/// One serialized transaction in the outbound payload. Amounts are
/// rounded to 2 decimal places and categories are restricted to the
/// normalized vocabulary before transmission.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionLine {
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_spent: Decimal,
    pub transaction_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub label: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub transactions: Vec<TransactionLine>,
}

/// Borrowed inputs for one period of the analysis request.
pub struct PeriodData<'a> {
    pub label: &'a str,
    pub transactions: &'a [Transaction],
    pub totals: &'a Aggregation,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub current: PeriodSummary,
    pub prior: PeriodSummary,
    pub trends: Vec<TrendInsight>,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub next_month: String,
    pub history: Vec<TransactionLine>,
    pub truncated: bool,
}

/// Shape the bounded payload for the external analysis service. The total
/// number of serialized transactions never exceeds `max_transactions`;
/// when the cap bites, the budget is split across the two periods and the
/// most recent transactions win.
pub fn build_analysis_request(
    current: &PeriodData,
    prior: &PeriodData,
    insights: &[TrendInsight],
    limits: &RequestLimits,
) -> AnalysisRequest {
    let vocabulary: BTreeSet<String> = current
        .totals
        .by_category
        .iter()
        .chain(prior.totals.by_category.iter())
        .map(|s| s.category.clone())
        .collect();

    let cap = limits.max_transactions;
    let total = current.transactions.len() + prior.transactions.len();
    let truncated = total > cap;
    let (cur_take, pri_take) = if truncated {
        let half = cap / 2;
        let cur_take = current
            .transactions
            .len()
            .min(cap.saturating_sub(prior.transactions.len().min(half)));
        let pri_take = prior.transactions.len().min(cap - cur_take);
        (cur_take, pri_take)
    } else {
        (current.transactions.len(), prior.transactions.len())
    };

    AnalysisRequest {
        current: period_summary(current, cur_take, &vocabulary),
        prior: period_summary(prior, pri_take, &vocabulary),
        trends: insights.to_vec(),
        truncated,
    }
}

fn period_summary(
    period: &PeriodData,
    take: usize,
    vocabulary: &BTreeSet<String>,
) -> PeriodSummary {
    let mut txs: Vec<&Transaction> = period.transactions.iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    let skip = txs.len() - take;
    let transactions = txs
        .into_iter()
        .skip(skip)
        .map(|t| transaction_line(t, Some(vocabulary)))
        .collect();
    PeriodSummary {
        label: period.label.to_string(),
        total_income: period.totals.total_income.round_dp(2),
        total_expense: period.totals.total_expense.round_dp(2),
        by_category: period
            .totals
            .by_category
            .iter()
            .map(|s| CategoryTotal {
                category: s.category.clone(),
                total_spent: s.total_spent.round_dp(2),
                transaction_count: s.transaction_count,
            })
            .collect(),
        transactions,
    }
}

fn transaction_line(tx: &Transaction, vocabulary: Option<&BTreeSet<String>>) -> TransactionLine {
    let normalized = normalize_category(&tx.category);
    let category = match vocabulary {
        Some(vocab) if !vocab.contains(&normalized) => OTHER_CATEGORY.to_string(),
        _ => normalized,
    };
    TransactionLine {
        kind: tx.kind,
        amount: tx.amount.round_dp(2),
        category,
        date: tx.date,
    }
}

/// Shape the bounded history payload for an expense prediction. The most
/// recent transactions are kept when the cap bites.
pub fn build_prediction_request(
    next_month: &str,
    transactions: &[Transaction],
    limits: &RequestLimits,
) -> PredictionRequest {
    let mut txs: Vec<&Transaction> = transactions.iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    let truncated = txs.len() > limits.max_transactions;
    let skip = txs.len().saturating_sub(limits.max_transactions);
    PredictionRequest {
        next_month: next_month.to_string(),
        history: txs
            .into_iter()
            .skip(skip)
            .map(|t| transaction_line(t, None))
            .collect(),
        truncated,
    }
}

/// Validate and normalize the external service's analysis response.
/// All-or-nothing: a report either passes every check or nothing of it is
/// kept. A report with no actionable content is a failed generation.
pub fn validate_analysis_response(raw: &Value) -> CoreResult<AiReport> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::SchemaViolation("response is not a JSON object".to_string()))?;

    let month = field_str(obj, "month")?;
    let total_expenses = field_decimal(obj, "totalExpenses")?;
    let summary = field_str(obj, "summary")?;
    let recommendations = field_str_array(obj, "recommendations")?;
    let risks = field_str_array(obj, "risks")?;
    let category_spending = field_decimal_map(obj, "categorySpending")?;

    let recommended_savings = match obj.get("recommendedSavings") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(decimal_from_number(n, "recommendedSavings")?),
        Some(_) => {
            return Err(CoreError::SchemaViolation(
                "field 'recommendedSavings' is not a number".to_string(),
            ));
        }
    };
    let spending_trends = match obj.get("spendingTrends") {
        None | Some(Value::Null) => Vec::new(),
        Some(_) => field_str_array(obj, "spendingTrends")?,
    };

    if recommendations.is_empty() || risks.is_empty() {
        return Err(CoreError::EmptyRecommendations);
    }

    Ok(AiReport {
        month,
        total_expenses,
        recommended_savings,
        summary,
        recommendations,
        risks,
        spending_trends,
        category_spending,
    })
}

/// Validate the external service's prediction response.
pub fn validate_prediction_response(raw: &Value) -> CoreResult<AiPrediction> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::SchemaViolation("response is not a JSON object".to_string()))?;
    Ok(AiPrediction {
        next_month: field_str(obj, "nextMonth")?,
        summary: field_str(obj, "summary")?,
        predicted_expenses: field_decimal_map(obj, "predictedExpenses")?,
    })
}

fn field_str(obj: &serde_json::Map<String, Value>, name: &str) -> CoreResult<String> {
    match obj.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CoreError::SchemaViolation(format!(
            "field '{}' is not a string",
            name
        ))),
        None => Err(CoreError::SchemaViolation(format!(
            "missing field '{}'",
            name
        ))),
    }
}

fn field_decimal(obj: &serde_json::Map<String, Value>, name: &str) -> CoreResult<Decimal> {
    match obj.get(name) {
        Some(Value::Number(n)) => decimal_from_number(n, name),
        Some(_) => Err(CoreError::SchemaViolation(format!(
            "field '{}' is not a number",
            name
        ))),
        None => Err(CoreError::SchemaViolation(format!(
            "missing field '{}'",
            name
        ))),
    }
}

fn field_str_array(obj: &serde_json::Map<String, Value>, name: &str) -> CoreResult<Vec<String>> {
    let items = match obj.get(name) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(CoreError::SchemaViolation(format!(
                "field '{}' is not an array",
                name
            )));
        }
        None => {
            return Err(CoreError::SchemaViolation(format!(
                "missing field '{}'",
                name
            )));
        }
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(CoreError::SchemaViolation(format!(
                "field '{}' contains a non-string element",
                name
            ))),
        })
        .collect()
}

fn field_decimal_map(
    obj: &serde_json::Map<String, Value>,
    name: &str,
) -> CoreResult<BTreeMap<String, Decimal>> {
    let map = match obj.get(name) {
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(CoreError::SchemaViolation(format!(
                "field '{}' is not an object",
                name
            )));
        }
        None => {
            return Err(CoreError::SchemaViolation(format!(
                "missing field '{}'",
                name
            )));
        }
    };
    let mut out = BTreeMap::new();
    for (key, value) in map {
        match value {
            Value::Number(n) => {
                out.insert(key.clone(), decimal_from_number(n, name)?);
            }
            _ => {
                return Err(CoreError::SchemaViolation(format!(
                    "field '{}' has a non-numeric value for '{}'",
                    name, key
                )));
            }
        }
    }
    Ok(out)
}

fn decimal_from_number(n: &serde_json::Number, name: &str) -> CoreResult<Decimal> {
    let f = n.as_f64().ok_or_else(|| {
        CoreError::SchemaViolation(format!("field '{}' is not a finite number", name))
    })?;
    Decimal::try_from(f)
        .map(|d| d.round_dp(2))
        .map_err(|_| CoreError::SchemaViolation(format!("field '{}' is out of range", name)))
}
