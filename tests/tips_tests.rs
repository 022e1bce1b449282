// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::core::tips::SavingTipLedger;
use finsight::error::CoreError;
use rusqlite::Connection;
use rust_decimal::Decimal;

#[test]
fn implement_unknown_tip_is_not_found() {
    let mut ledger = SavingTipLedger::seed();
    let err = ledger.implement("no-such-tip").unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn implement_is_idempotent_and_one_way() {
    let mut ledger = SavingTipLedger::seed();
    ledger.implement("brew-at-home").unwrap();
    ledger.implement("brew-at-home").unwrap();
    let summary = ledger.summary();
    assert_eq!(summary.implemented_count, 1);
    assert_eq!(summary.implemented_savings, Decimal::from(150));
}

#[test]
fn summary_totals_add_up() {
    let mut ledger = SavingTipLedger::seed();
    ledger.implement("brew-at-home").unwrap();
    ledger.implement("automate-savings").unwrap();
    let s = ledger.summary();
    assert_eq!(s.implemented_count, 2);
    assert_eq!(s.implemented_savings, Decimal::from(650));
    assert_eq!(s.total_potential_savings, Decimal::from(1450));
    // 650 / 1450 = 44.8%, keep it to one decimal for the check
    assert_eq!(s.achieved_percent.round_dp(1), "44.8".parse().unwrap());
}

#[test]
fn empty_catalog_yields_zero_percent_not_nan() {
    let ledger = SavingTipLedger::new(Vec::new());
    let s = ledger.summary();
    assert_eq!(s.achieved_percent, Decimal::ZERO);
    assert_eq!(s.total_potential_savings, Decimal::ZERO);
}

#[test]
fn catalog_survives_a_database_round_trip() {
    let mut conn = Connection::open_in_memory().unwrap();
    finsight::db::init_schema(&mut conn).unwrap();

    let ledger = finsight::db::load_tip_ledger(&conn).unwrap();
    assert_eq!(ledger.tips().len(), 6);
    assert!(ledger.tips().iter().all(|t| !t.implemented));

    finsight::db::mark_tip_implemented(&conn, "review-subscriptions").unwrap();
    let ledger = finsight::db::load_tip_ledger(&conn).unwrap();
    let tip = ledger
        .tips()
        .iter()
        .find(|t| t.id == "review-subscriptions")
        .unwrap();
    assert!(tip.implemented);

    // Re-running init must not duplicate or reset the catalog
    finsight::db::init_schema(&mut conn).unwrap();
    let ledger = finsight::db::load_tip_ledger(&conn).unwrap();
    assert_eq!(ledger.tips().len(), 6);
    assert_eq!(ledger.summary().implemented_count, 1);
}
