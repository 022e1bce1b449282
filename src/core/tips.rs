// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::models::{SavingTip, TipDifficulty, TipSummary};

/// Fixed catalog of saving tips plus per-tip implementation state. Tips
/// are never created or deleted here; `implement` is the only mutation
/// and there is no reverse transition.
#[derive(Debug, Clone)]
pub struct SavingTipLedger {
    tips: Vec<SavingTip>,
}

impl SavingTipLedger {
    pub fn new(tips: Vec<SavingTip>) -> Self {
        SavingTipLedger { tips }
    }

    /// The stock catalog used to seed a fresh database.
    pub fn seed() -> Self {
        let catalog = [
            (
                "brew-at-home",
                "Brew coffee at home",
                "Save up to $150 a month by brewing coffee at home instead of buying it.",
                TipDifficulty::Easy,
                150,
            ),
            (
                "rule-50-30-20",
                "Use the 50/30/20 rule",
                "Put 50% toward needs, 30% toward wants, and 20% into savings.",
                TipDifficulty::Medium,
                400,
            ),
            (
                "shopping-list",
                "Shop with a list and compare prices",
                "Make a list before shopping and compare prices online first.",
                TipDifficulty::Easy,
                200,
            ),
            (
                "review-subscriptions",
                "Review monthly subscriptions",
                "Cancel services you no longer use. Re-check every 3 months.",
                TipDifficulty::Easy,
                80,
            ),
            (
                "optimize-trips",
                "Optimize your trips",
                "Combine errands, take public transport, or walk when you can.",
                TipDifficulty::Medium,
                120,
            ),
            (
                "automate-savings",
                "Automate your savings",
                "Schedule an automatic transfer at the start of every month.",
                TipDifficulty::Easy,
                500,
            ),
        ];
        SavingTipLedger {
            tips: catalog
                .into_iter()
                .map(|(id, title, description, difficulty, saving)| SavingTip {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    difficulty,
                    potential_saving: Decimal::from(saving),
                    implemented: false,
                })
                .collect(),
        }
    }

    pub fn tips(&self) -> &[SavingTip] {
        &self.tips
    }

    /// Marks a tip implemented. Idempotent for tips already implemented;
    /// unknown ids fail with `NotFound`.
    pub fn implement(&mut self, tip_id: &str) -> CoreResult<&SavingTip> {
        let tip = self
            .tips
            .iter_mut()
            .find(|t| t.id == tip_id)
            .ok_or_else(|| CoreError::NotFound(format!("saving tip '{}'", tip_id)))?;
        tip.implemented = true;
        Ok(&*tip)
    }

    /// Rollup of implementation progress. Achieved percent is zero when
    /// the catalog carries no potential at all.
    pub fn summary(&self) -> TipSummary {
        let mut implemented_count = 0usize;
        let mut implemented_savings = Decimal::ZERO;
        let mut total_potential_savings = Decimal::ZERO;
        for tip in &self.tips {
            total_potential_savings += tip.potential_saving;
            if tip.implemented {
                implemented_count += 1;
                implemented_savings += tip.potential_saving;
            }
        }
        let achieved_percent = if total_potential_savings.is_zero() {
            Decimal::ZERO
        } else {
            implemented_savings / total_potential_savings * Decimal::ONE_HUNDRED
        };
        TipSummary {
            implemented_count,
            implemented_savings,
            total_potential_savings,
            achieved_percent,
        }
    }
}
