use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use super::config::{Config, OccupantStay};
use super::error::ConfigError;
use super::result::{AllocationResult, ShareDetail};
use super::validation::validate;
use super::weights::{calculate_weights, OccupancyWeights};

/// Validate the inputs, weigh the stays and allocate the period's total.
pub fn calculate_rent(
    config: &Config,
    stays: &[OccupantStay],
) -> Result<AllocationResult, ConfigError> {
    let config = validate(config, stays)?;
    let weights = calculate_weights(stays)?;
    allocate(&config, &weights, stays)
}

/// Split `config.total_cost()` across the roommates in `weights`.
///
/// All intermediate amounts are exact fractions over the household's total
/// days. Each roommate's exact share is
///
/// `total × wᵢ + adjᵢ − wᵢ × Σ adj`
///
/// so adjustments move money between roommates without changing the total.
/// Shares are then rounded half up to whole kronor and any remainder is
/// reconciled one krona at a time, largest rounding residual first.
///
/// Roommates are taken from `weights`; `stays` supplies room adjustments.
/// Roommates with zero days get a share of exactly 0 and their adjustment is
/// ignored. Negative shares are returned as-is: they mean the household owes
/// that roommate money.
pub fn allocate(
    config: &Config,
    weights: &OccupancyWeights,
    stays: &[OccupantStay],
) -> Result<AllocationResult, ConfigError> {
    let denominator = i128::from(weights.total_days());
    if denominator == 0 {
        return Err(ConfigError::NoOccupancy);
    }
    let total = config
        .checked_total_cost()
        .map(i128::from)
        .ok_or(ConfigError::AmountOutOfRange {
            field: "total_cost",
        })?;

    let mut rows = share_rows(weights, stays, total);
    let adjustment_pool: i128 = rows.iter().map(|row| i128::from(row.room_adjustment)).sum();

    debug!(
        period = %config.period(),
        total_cost = config.total_cost(),
        total_days = weights.total_days(),
        adjustment_pool = adjustment_pool as i64,
        "Allocating rent"
    );

    reconcile_rounding(&mut rows, total, denominator);

    let details = rows
        .iter()
        .map(|row| {
            // Validated inputs keep every share within i64
            let share = i64::try_from(row.rounded + row.correction).map_err(|_| {
                ConfigError::AmountOutOfRange {
                    field: "room_adjustment",
                }
            })?;
            Ok(ShareDetail {
                name: row.name.to_string(),
                days: row.days,
                weight: weights.weight(row.name).unwrap_or(0.0),
                base: to_decimal(row.base, denominator),
                room_adjustment: row.room_adjustment,
                redistribution: to_decimal(row.redistribution, denominator),
                exact: to_decimal(row.exact, denominator),
                rounding_correction: row.correction as i64,
                share,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(AllocationResult::assemble(config, details))
}

/// Exact shares of `total` as numerators over `weights.total_days()`, one row
/// per roommate in name order.
fn share_rows<'a>(
    weights: &'a OccupancyWeights,
    stays: &[OccupantStay],
    total: i128,
) -> Vec<ShareRow<'a>> {
    let denominator = i128::from(weights.total_days());
    let adjustments: HashMap<&str, i64> = stays
        .iter()
        .map(|stay| (stay.name.as_str(), stay.room_adjustment))
        .collect();
    let adjustment_for = |name: &str, days: u32| -> i64 {
        if days == 0 {
            0
        } else {
            adjustments.get(name).copied().unwrap_or(0)
        }
    };

    let adjustment_pool: i128 = weights
        .iter()
        .map(|(name, days)| i128::from(adjustment_for(name, days)))
        .sum();

    weights
        .iter()
        .map(|(name, days)| {
            let days_stayed = i128::from(days);
            let room_adjustment = adjustment_for(name, days);
            let base = total * days_stayed;
            let redistribution = -days_stayed * adjustment_pool;
            let exact = base + i128::from(room_adjustment) * denominator + redistribution;
            ShareRow {
                name,
                days,
                room_adjustment,
                base,
                redistribution,
                exact,
                rounded: round_half_up(exact, denominator),
                correction: 0,
            }
        })
        .collect()
}

/// Intermediate per-roommate amounts. `base`, `redistribution` and `exact`
/// are numerators over the household's total days; `rounded` is whole kronor.
struct ShareRow<'a> {
    name: &'a str,
    days: u32,
    room_adjustment: i64,
    base: i128,
    redistribution: i128,
    exact: i128,
    rounded: i128,
    correction: i128,
}

impl ShareRow<'_> {
    /// Exact share minus rounded share, as a numerator over the total days
    fn residual(&self, denominator: i128) -> i128 {
        self.exact - self.rounded * denominator
    }
}

/// Nearest whole krona; halves round towards positive infinity.
fn round_half_up(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);
    if remainder * 2 >= denominator {
        quotient + 1
    } else {
        quotient
    }
}

/// Make the rounded shares add up to `total` exactly.
///
/// The remainder `total − Σ rounded` is bounded by half the number of
/// roommates. A shortfall gives +1 to the roommates whose exact share lies
/// furthest above their rounded share; an excess gives −1 to those lying
/// furthest below. Ties go to the alphabetically first name. Roommates with
/// zero days are never touched.
fn reconcile_rounding(rows: &mut [ShareRow<'_>], total: i128, denominator: i128) {
    let remainder = total - rows.iter().map(|row| row.rounded).sum::<i128>();
    if remainder == 0 {
        return;
    }
    let step = remainder.signum();

    let mut candidates: Vec<usize> = (0..rows.len())
        .filter(|&i| rows[i].days > 0 && rows[i].residual(denominator).signum() == step)
        .collect();
    candidates.sort_by(|&a, &b| {
        let distance_a = rows[a].residual(denominator) * step;
        let distance_b = rows[b].residual(denominator) * step;
        match distance_b.cmp(&distance_a) {
            Ordering::Equal => rows[a].name.cmp(rows[b].name),
            other => other,
        }
    });

    debug!(remainder = remainder as i64, "Reconciling rounding remainder");

    let count = usize::try_from(remainder.unsigned_abs()).unwrap_or(usize::MAX);
    for &i in candidates.iter().take(count) {
        rows[i].correction = step;
    }
}

fn to_decimal(numerator: i128, denominator: i128) -> Decimal {
    // Display only; the allocation itself never leaves integer arithmetic
    match (Decimal::from_i128(numerator), Decimal::from_i128(denominator)) {
        (Some(n), Some(d)) => n.checked_div(d).map(|v| v.round_dp(2)).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}
