// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::core::aggregate::normalize_category;
use crate::models::{CategorySpend, TrendDirection, TrendInsight};

#[derive(Debug, Clone)]
pub struct TrendOptions {
    /// Band (in percent points) inside which a change counts as flat.
    pub epsilon_percent: Decimal,
    /// Largest movers kept; matches the external report's insight count.
    pub top_n: usize,
}

impl Default for TrendOptions {
    fn default() -> Self {
        TrendOptions {
            epsilon_percent: Decimal::ONE,
            top_n: 3,
        }
    }
}

/// Compare two per-category rollups and rank the movers. Categories at
/// zero in both periods are omitted. A category with no prior spend is
/// reported as new spending with no percentage, and new spending sorts
/// ahead of any finite change.
pub fn compare(
    current: &[CategorySpend],
    prior: &[CategorySpend],
    opts: &TrendOptions,
) -> Vec<TrendInsight> {
    let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for s in current {
        let entry = totals
            .entry(normalize_category(&s.category))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += s.total_spent;
    }
    for s in prior {
        let entry = totals
            .entry(normalize_category(&s.category))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.1 += s.total_spent;
    }

    let mut insights = Vec::new();
    for (category, (current_total, prior_total)) in totals {
        if current_total.is_zero() && prior_total.is_zero() {
            continue;
        }
        if prior_total.is_zero() {
            insights.push(TrendInsight {
                category,
                current_total,
                prior_total,
                percent_change: None,
                direction: TrendDirection::NewSpending,
            });
            continue;
        }
        let percent = (current_total - prior_total) / prior_total * Decimal::ONE_HUNDRED;
        let direction = if percent.abs() < opts.epsilon_percent {
            TrendDirection::Flat
        } else if percent > Decimal::ZERO {
            TrendDirection::Increase
        } else {
            TrendDirection::Decrease
        };
        insights.push(TrendInsight {
            category,
            current_total,
            prior_total,
            percent_change: Some(percent),
            direction,
        });
    }

    insights.sort_by(|a, b| match (a.percent_change, b.percent_change) {
        (None, None) => a.category.cmp(&b.category),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y
            .abs()
            .cmp(&x.abs())
            .then_with(|| a.category.cmp(&b.category)),
    });
    insights.truncate(opts.top_n);
    insights
}
