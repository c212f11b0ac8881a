//! Split calculation domain logic.
//!
//! This module decides whether a split configuration is valid and turns a
//! valid configuration into per-participant shares of an expense. It is pure:
//! no storage access, no hidden state, the same inputs always give the same
//! answer. The split form calls `validate` after every edit to decide whether
//! the confirm action is enabled.
//!
//! ## Rules
//!
//! - **Equal**: always valid; each selected participant pays `total / n`
//! - **Percentage**: valid when the selected contributions add up to 100
//!   within [`PERCENTAGE_TOLERANCE`]; each share is `total * pct / 100`
//! - **FixedAmount**: valid when every selected participant has a contribution
//!   strictly greater than 0; the share is the contribution itself
//!
//! Missing contributions read as 0, and anything that is not a finite number
//! makes the split invalid.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use shared::{SplitConfig, SplitMode};

use crate::domain::models::{ContributionMap, SplitError, SplitResult};

/// Absolute tolerance when checking that percentages add up to 100.
/// The boundary is inclusive: a sum of exactly 99.99 or 100.01 is accepted.
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Absorbs binary rounding noise at the tolerance boundary (100.0 - 99.99 is
/// slightly above 0.01 in f64).
const FLOAT_SLACK: f64 = 1e-9;

const FULL_PERCENTAGE: f64 = 100.0;

/// Split calculator that validates split configurations and computes shares
#[derive(Debug, Clone)]
pub struct SplitCalculator {
    percentage_tolerance: f64,
}

impl SplitCalculator {
    pub fn new() -> Self {
        Self {
            percentage_tolerance: PERCENTAGE_TOLERANCE,
        }
    }

    pub fn with_config(config: &SplitConfig) -> Self {
        let tolerance = config.percentage_tolerance;
        let percentage_tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            PERCENTAGE_TOLERANCE
        };
        Self { percentage_tolerance }
    }

    pub fn percentage_tolerance(&self) -> f64 {
        self.percentage_tolerance
    }

    /// Check whether the split is valid for the selected participants
    pub fn validate(
        &self,
        mode: SplitMode,
        contributions: &ContributionMap,
        selected: &BTreeSet<String>,
    ) -> bool {
        let is_valid = match mode {
            SplitMode::Equal => true,
            SplitMode::Percentage => {
                let sum = contributions.sum_over(selected);
                (sum - FULL_PERCENTAGE).abs() <= self.percentage_tolerance + FLOAT_SLACK
            }
            SplitMode::FixedAmount => selected.iter().all(|id| {
                contributions
                    .get(id)
                    .map(|amount| amount.is_finite() && amount > 0.0)
                    .unwrap_or(false)
            }),
        };

        debug!(
            "Validated {} split over {} participants: valid={}",
            mode,
            selected.len(),
            is_valid
        );
        is_valid
    }

    /// Compute each selected participant's share of `total_amount`
    ///
    /// Fixed amounts are returned as entered; they are not reconciled against
    /// the total (see [`SplitCalculator::unallocated`]).
    pub fn compute_shares(
        &self,
        mode: SplitMode,
        contributions: &ContributionMap,
        selected: &BTreeSet<String>,
        total_amount: f64,
    ) -> Result<SplitResult, SplitError> {
        if !total_amount.is_finite() {
            return Err(SplitError::NonFiniteTotal);
        }

        let shares: BTreeMap<String, f64> = match mode {
            SplitMode::Equal => {
                if selected.is_empty() {
                    return Err(SplitError::EmptySelection);
                }
                let share = total_amount / selected.len() as f64;
                selected.iter().map(|id| (id.clone(), share)).collect()
            }
            SplitMode::Percentage => selected
                .iter()
                .map(|id| {
                    let share = total_amount * (contributions.value_or_zero(id) / FULL_PERCENTAGE);
                    (id.clone(), share)
                })
                .collect(),
            SplitMode::FixedAmount => selected
                .iter()
                .map(|id| (id.clone(), contributions.value_or_zero(id)))
                .collect(),
        };

        Ok(SplitResult {
            mode,
            is_valid: self.validate(mode, contributions, selected),
            shares,
        })
    }

    /// Part of the total not covered by the computed shares
    ///
    /// Zero (up to float noise) for equal and complete percentage splits;
    /// for fixed amounts it tells the caller how far the entries are from the
    /// expense total.
    pub fn unallocated(&self, result: &SplitResult, total_amount: f64) -> f64 {
        total_amount - result.total_allocated()
    }
}

impl Default for SplitCalculator {
    fn default() -> Self {
        Self::new()
    }
}
