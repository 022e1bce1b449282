// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::core::trend::{TrendOptions, compare};
use finsight::models::{CategorySpend, TrendDirection};
use rust_decimal::Decimal;

fn spend(category: &str, total: &str) -> CategorySpend {
    CategorySpend {
        category: category.to_string(),
        total_spent: total.parse().unwrap(),
        transaction_count: 1,
    }
}

#[test]
fn fifty_percent_increase_is_ranked() {
    let insights = compare(
        &[spend("Food", "150")],
        &[spend("Food", "100")],
        &TrendOptions::default(),
    );
    assert_eq!(insights.len(), 1);
    let i = &insights[0];
    assert_eq!(i.category, "Food");
    assert_eq!(i.percent_change, Some(Decimal::from(50)));
    assert_eq!(i.direction, TrendDirection::Increase);
}

#[test]
fn new_spending_gets_sentinel_not_infinity() {
    let insights = compare(
        &[spend("Food", "40")],
        &[],
        &TrendOptions::default(),
    );
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].direction, TrendDirection::NewSpending);
    assert_eq!(insights[0].percent_change, None);
}

#[test]
fn identical_periods_are_flat_and_zero_pairs_are_omitted() {
    let current = vec![spend("Food", "100"), spend("Transport", "0")];
    let prior = vec![spend("Food", "100"), spend("Transport", "0")];
    let insights = compare(&current, &prior, &TrendOptions::default());
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].category, "Food");
    assert_eq!(insights[0].percent_change, Some(Decimal::ZERO));
    assert_eq!(insights[0].direction, TrendDirection::Flat);
}

#[test]
fn spending_that_stopped_is_a_full_decrease() {
    let insights = compare(
        &[],
        &[spend("Gym", "35")],
        &TrendOptions::default(),
    );
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].percent_change, Some(Decimal::from(-100)));
    assert_eq!(insights[0].direction, TrendDirection::Decrease);
}

#[test]
fn largest_movers_come_first_with_new_spending_on_top() {
    let current = vec![
        spend("Food", "110"),
        spend("Transport", "300"),
        spend("Gaming", "50"),
    ];
    let prior = vec![spend("Food", "100"), spend("Transport", "100")];
    let insights = compare(
        &current,
        &prior,
        &TrendOptions {
            epsilon_percent: Decimal::ONE,
            top_n: 10,
        },
    );
    let names: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
    assert_eq!(names, vec!["Gaming", "Transport", "Food"]);
}

#[test]
fn ties_break_by_category_name() {
    let current = vec![spend("Beta", "200"), spend("Alpha", "200")];
    let prior = vec![spend("Beta", "100"), spend("Alpha", "100")];
    let insights = compare(&current, &prior, &TrendOptions::default());
    let names: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn top_n_truncates_the_ranking() {
    let current = vec![
        spend("A", "400"),
        spend("B", "300"),
        spend("C", "200"),
        spend("D", "150"),
    ];
    let prior = vec![
        spend("A", "100"),
        spend("B", "100"),
        spend("C", "100"),
        spend("D", "100"),
    ];
    let insights = compare(&current, &prior, &TrendOptions::default());
    assert_eq!(insights.len(), 3);
    let names: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn changes_inside_epsilon_read_as_flat() {
    let insights = compare(
        &[spend("Food", "100.5")],
        &[spend("Food", "100")],
        &TrendOptions {
            epsilon_percent: Decimal::ONE,
            top_n: 3,
        },
    );
    assert_eq!(insights[0].direction, TrendDirection::Flat);
    assert_eq!(insights[0].percent_change, Some("0.5".parse().unwrap()));
}
