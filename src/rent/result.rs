use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{Config, Period, UtilityCharge};

/// Itemised costs behind a period's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub kallhyra: i64,
    pub el: i64,
    pub bredband: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_rakning: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vattenavgift: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub va: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub larm: Option<i64>,
    pub drift_total: i64,
    #[serde(default)]
    pub saldo_innan: i64,
    #[serde(default)]
    pub extra_in: i64,
    pub total: i64,
}

impl CostBreakdown {
    /// Only the fees that apply to the period are listed: the quarterly
    /// invoice or the monthly trio.
    pub fn from_config(config: &Config) -> Self {
        let (drift_rakning, vattenavgift, va, larm) = match config.utility_charge() {
            UtilityCharge::TrueUp(amount) => (Some(amount), None, None, None),
            UtilityCharge::Monthly {
                vattenavgift,
                va,
                larm,
            } => (None, Some(vattenavgift), Some(va), Some(larm)),
        };

        Self {
            kallhyra: config.kallhyra,
            el: config.el,
            bredband: config.bredband,
            drift_rakning,
            vattenavgift,
            va,
            larm,
            drift_total: config.drift_total(),
            saldo_innan: config.saldo_innan.unwrap_or(0),
            extra_in: config.extra_in.unwrap_or(0),
            total: config.total_cost(),
        }
    }
}

/// How one roommate's share was arrived at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareDetail {
    pub name: String,
    pub days: u32,
    pub weight: f64,
    /// Pro-rata share of the total before adjustments
    pub base: Decimal,
    pub room_adjustment: i64,
    /// This roommate's part in funding everyone's adjustments
    pub redistribution: Decimal,
    /// Share before rounding to whole kronor
    pub exact: Decimal,
    /// +1/-1 applied to make the shares add up, otherwise 0
    pub rounding_correction: i64,
    pub share: i64,
}

/// Final outcome of one rent calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub period: Period,
    pub total_cost: i64,
    /// Roommate name to whole-krona share; a negative share is a credit
    pub shares: BTreeMap<String, i64>,
    pub costs: CostBreakdown,
    pub details: Vec<ShareDetail>,
}

impl AllocationResult {
    /// Package per-roommate details with the period and cost breakdown.
    pub fn assemble(config: &Config, mut details: Vec<ShareDetail>) -> Self {
        details.sort_by(|a, b| a.name.cmp(&b.name));
        let shares = details
            .iter()
            .map(|detail| (detail.name.clone(), detail.share))
            .collect();

        Self {
            period: config.period(),
            total_cost: config.total_cost(),
            shares,
            costs: CostBreakdown::from_config(config),
            details,
        }
    }

    pub fn share(&self, name: &str) -> Option<i64> {
        self.shares.get(name).copied()
    }

    pub fn sum_of_shares(&self) -> i64 {
        self.shares.values().sum()
    }

    pub fn detail(&self, name: &str) -> Option<&ShareDetail> {
        self.details.iter().find(|detail| detail.name == name)
    }

    /// Roommates who actually stayed during the period, i.e. those who are billed
    pub fn billed(&self) -> impl Iterator<Item = &ShareDetail> {
        self.details.iter().filter(|detail| detail.days > 0)
    }
}
