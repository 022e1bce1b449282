// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{CategorySpend, Transaction, TxKind};

/// Reserved bucket for transactions whose category is blank.
pub const OTHER_CATEGORY: &str = "Other";

/// Inclusive date range. Construction fails when start is after end, so a
/// held `Window` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidWindow { start, end });
        }
        Ok(Window { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Canonical category form: trimmed, interior whitespace collapsed, each
/// word capitalized so grouping is case-insensitive. Blank input falls
/// into the reserved `Other` bucket.
pub fn normalize_category(raw: &str) -> String {
    let mut words = raw.split_whitespace().peekable();
    if words.peek().is_none() {
        return OTHER_CATEGORY.to_string();
    }
    words
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expense rollup and income/expense totals for one window. The sum of
/// `by_category` totals always equals `total_expense`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregation {
    pub by_category: Vec<CategorySpend>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

/// Roll up transactions falling inside `window`. An empty window yields
/// zero totals, not an error. Categories are sorted by total spent
/// descending, ties by name, so output order is deterministic.
pub fn aggregate(transactions: &[Transaction], window: &Window) -> Aggregation {
    let mut buckets: BTreeMap<String, CategorySpend> = BTreeMap::new();
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for tx in transactions.iter().filter(|t| window.contains(t.date)) {
        match tx.kind {
            TxKind::Income => total_income += tx.amount,
            TxKind::Expense => {
                total_expense += tx.amount;
                let name = normalize_category(&tx.category);
                let entry = buckets.entry(name.clone()).or_insert_with(|| CategorySpend {
                    category: name,
                    total_spent: Decimal::ZERO,
                    transaction_count: 0,
                });
                entry.total_spent += tx.amount;
                entry.transaction_count += 1;
            }
        }
    }

    let mut by_category: Vec<CategorySpend> = buckets.into_values().collect();
    by_category.sort_by(|a, b| {
        b.total_spent
            .cmp(&a.total_spent)
            .then_with(|| a.category.cmp(&b.category))
    });

    Aggregation {
        by_category,
        total_income,
        total_expense,
    }
}
