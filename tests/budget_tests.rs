// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::core::budget::status;
use finsight::models::{BudgetCategory, CategorySpend};
use rust_decimal::Decimal;

fn spend(category: &str, total: &str, count: u32) -> CategorySpend {
    CategorySpend {
        category: category.to_string(),
        total_spent: total.parse().unwrap(),
        transaction_count: count,
    }
}

fn budget(id: i64, name: &str, limit: &str) -> BudgetCategory {
    BudgetCategory {
        id,
        name: name.to_string(),
        monthly_limit: limit.parse().unwrap(),
    }
}

#[test]
fn overspend_keeps_signed_remaining_and_caps_display_percent() {
    let report = status(
        &[spend("Food", "80", 3)],
        &[budget(1, "Food", "60")],
        Decimal::from(100),
    );
    assert_eq!(report.statuses.len(), 1);
    let s = &report.statuses[0];
    assert_eq!(s.spent, Decimal::from(80));
    assert_eq!(s.limit, Decimal::from(60));
    assert_eq!(s.remaining, Decimal::from(-20));
    assert_eq!(s.percent_used, Decimal::from(100));
    assert!(report.unbudgeted.is_empty());
}

#[test]
fn zero_limit_reports_zero_percent() {
    let report = status(
        &[spend("Food", "40", 1)],
        &[budget(1, "Food", "0")],
        Decimal::from(100),
    );
    let s = &report.statuses[0];
    assert_eq!(s.percent_used, Decimal::ZERO);
    assert_eq!(s.remaining, Decimal::from(-40));
}

#[test]
fn budget_without_spend_shows_full_remaining() {
    let report = status(&[], &[budget(1, "Transport", "200")], Decimal::from(100));
    let s = &report.statuses[0];
    assert_eq!(s.spent, Decimal::ZERO);
    assert_eq!(s.remaining, Decimal::from(200));
    assert_eq!(s.percent_used, Decimal::ZERO);
}

#[test]
fn unbudgeted_spend_is_surfaced_not_dropped() {
    let report = status(
        &[
            spend("Food", "50", 2),
            spend("Gaming", "120", 1),
            spend("Coffee", "15", 3),
        ],
        &[budget(1, "Food", "100")],
        Decimal::from(100),
    );
    let names: Vec<&str> = report
        .unbudgeted
        .iter()
        .map(|s| s.category.as_str())
        .collect();
    assert_eq!(names, vec!["Gaming", "Coffee"]);
}

#[test]
fn budget_names_match_spend_after_normalization() {
    let report = status(
        &[spend("Food", "30", 1)],
        &[budget(1, "  food ", "90")],
        Decimal::from(100),
    );
    let s = &report.statuses[0];
    assert_eq!(s.category, "Food");
    assert_eq!(s.spent, Decimal::from(30));
    assert_eq!(s.remaining, Decimal::from(60));
    assert!(report.unbudgeted.is_empty());
}

#[test]
fn percent_used_is_exact_below_the_cap() {
    let report = status(
        &[spend("Food", "45", 1)],
        &[budget(1, "Food", "60")],
        Decimal::from(100),
    );
    assert_eq!(report.statuses[0].percent_used, Decimal::from(75));
}
