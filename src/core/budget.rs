// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::aggregate::normalize_category;
use crate::models::{BudgetCategory, BudgetStatus, CategorySpend};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub statuses: Vec<BudgetStatus>,
    /// Spend in categories with no configured budget. Surfaced, never
    /// silently dropped.
    pub unbudgeted: Vec<CategorySpend>,
}

/// Pure budget math over one window's category spend. Every configured
/// budget gets a row (zero spend when absent). `remaining` is signed and
/// uncapped; `percent_used` is zero for zero limits and capped at
/// `percent_ceiling` for display.
pub fn status(
    spend: &[CategorySpend],
    budgets: &[BudgetCategory],
    percent_ceiling: Decimal,
) -> BudgetReport {
    let mut statuses = Vec::with_capacity(budgets.len());
    for b in budgets {
        let name = normalize_category(&b.name);
        let spent = spend
            .iter()
            .find(|s| normalize_category(&s.category) == name)
            .map(|s| s.total_spent)
            .unwrap_or(Decimal::ZERO);
        let percent_used = if b.monthly_limit.is_zero() {
            Decimal::ZERO
        } else {
            ((spent / b.monthly_limit) * Decimal::ONE_HUNDRED).min(percent_ceiling)
        };
        statuses.push(BudgetStatus {
            category: name,
            spent,
            limit: b.monthly_limit,
            remaining: b.monthly_limit - spent,
            percent_used,
        });
    }
    statuses.sort_by(|a, b| a.category.cmp(&b.category));

    let budgeted: BTreeSet<String> = statuses.iter().map(|s| s.category.clone()).collect();
    let mut unbudgeted: Vec<CategorySpend> = spend
        .iter()
        .filter(|s| !budgeted.contains(&normalize_category(&s.category)))
        .cloned()
        .collect();
    unbudgeted.sort_by(|a, b| {
        b.total_spent
            .cmp(&a.total_spent)
            .then_with(|| a.category.cmp(&b.category))
    });

    BudgetReport {
        statuses,
        unbudgeted,
    }
}
