// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable once recorded; amount is non-negative, sign implied by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Per-category expense rollup for one aggregation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub total_spent: Decimal,
    pub transaction_count: u32,
}

/// User-configured category with its monthly budget limit. Presentation
/// metadata (color, icon) lives in a separate style lookup, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: i64,
    pub name: String,
    pub monthly_limit: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub color: String,
    pub icon: String,
}

/// `remaining` is signed; overage is never clamped. `percent_used` is the
/// display figure, capped at the ceiling the caller asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Flat,
    NewSpending,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Increase => "increase",
            TrendDirection::Decrease => "decrease",
            TrendDirection::Flat => "flat",
            TrendDirection::NewSpending => "new spending",
        };
        f.write_str(s)
    }
}

/// `percent_change` is `None` exactly when the category is new spending
/// (prior total was zero), so no infinite percentage is ever reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInsight {
    pub category: String,
    pub current_total: Decimal,
    pub prior_total: Decimal,
    pub percent_change: Option<Decimal>,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TipDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipDifficulty::Easy => "easy",
            TipDifficulty::Medium => "medium",
            TipDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for TipDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `implemented` is the only mutable field; the catalog itself is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingTip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: TipDifficulty,
    pub potential_saving: Decimal,
    pub implemented: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipSummary {
    pub implemented_count: usize,
    pub implemented_savings: Decimal,
    pub total_potential_savings: Decimal,
    pub achieved_percent: Decimal,
}

/// Validated analysis result, persisted as append-only history in the
/// same camelCase shape the external service returns it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReport {
    pub month: String,
    pub total_expenses: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_savings: Option<Decimal>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risks: Vec<String>,
    #[serde(default)]
    pub spending_trends: Vec<String>,
    pub category_spending: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPrediction {
    pub next_month: String,
    pub summary: String,
    pub predicted_expenses: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationToggles {
    pub daily_updates: bool,
    pub weekly_reports: bool,
    pub payment_reminders: bool,
    pub budget_alerts: bool,
    pub large_transactions: bool,
    pub monthly_goals: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationThresholds {
    pub large_transaction: Decimal,
    pub daily_budget: Decimal,
    pub weekly_budget: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub phone_number: String,
    pub is_verified: bool,
    pub push_enabled: bool,
    pub push_token: Option<String>,
    pub notifications: NotificationToggles,
    pub dnd_enabled: bool,
    pub emergency_alerts: bool,
    pub thresholds: NotificationThresholds,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            phone_number: String::new(),
            is_verified: false,
            push_enabled: true,
            push_token: None,
            notifications: NotificationToggles {
                daily_updates: true,
                weekly_reports: true,
                payment_reminders: false,
                budget_alerts: true,
                large_transactions: true,
                monthly_goals: true,
            },
            dnd_enabled: true,
            emergency_alerts: true,
            thresholds: NotificationThresholds {
                large_transaction: Decimal::from(200),
                daily_budget: Decimal::from(80),
                weekly_budget: Decimal::from(90),
            },
        }
    }
}
