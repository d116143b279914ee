use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A billing period: one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month, or None if the month is out of range
    pub fn days_in_month(&self) -> Option<u32> {
        let first = self.first_day()?;
        let next = first.checked_add_months(Months::new(1))?;
        u32::try_from(next.signed_duration_since(first).num_days()).ok()
    }

    /// The following calendar month (December rolls over into January)
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Storage key in "YYYY-MM" form; sorts chronologically for four-digit years
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Invalid period '{}': expected YYYY-MM", s))?;
        let period = Period::new(year.parse()?, month.parse()?);
        if period.first_day().is_none() {
            anyhow::bail!("Invalid period '{}': month must be between 1 and 12", s);
        }
        Ok(period)
    }
}

/// Monthly cost configuration for one household and one period.
///
/// Amounts are whole kronor. A period either carries the quarterly
/// `drift_rakning` invoice or the three small monthly fees, never both.
///
/// Example YAML:
/// ```yaml
/// year: 2025
/// month: 1
/// kallhyra: 24530
/// el: 1600
/// bredband: 400
/// drift_rakning: 2612
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub year: i32,
    pub month: u32,

    /// Base rent paid to the landlord
    pub kallhyra: i64,

    /// Electricity for the period
    pub el: i64,

    /// Broadband fee
    pub bredband: i64,

    /// Quarterly true-up invoice for water, alarm and building operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_rakning: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vattenavgift: Option<i64>,

    /// Sewage fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub va: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub larm: Option<i64>,

    /// Credit left over from the previous period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saldo_innan: Option<i64>,

    /// Extra income that lowers what the household pays (e.g. a sublet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_in: Option<i64>,
}

/// How utilities beyond electricity and broadband are billed in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityCharge {
    /// Quarterly invoice replaces the monthly fees
    TrueUp(i64),
    Monthly { vattenavgift: i64, va: i64, larm: i64 },
}

impl UtilityCharge {
    /// Sum of the charge, or None if it does not fit in an `i64`
    pub fn checked_total(&self) -> Option<i64> {
        match self {
            UtilityCharge::TrueUp(amount) => Some(*amount),
            UtilityCharge::Monthly {
                vattenavgift,
                va,
                larm,
            } => vattenavgift.checked_add(*va)?.checked_add(*larm),
        }
    }

    pub fn total(&self) -> i64 {
        self.checked_total().unwrap_or(i64::MAX)
    }
}

impl Config {
    /// Config with the three fixed costs set and everything else absent
    pub fn new(year: i32, month: u32, kallhyra: i64, el: i64, bredband: i64) -> Self {
        Self {
            year,
            month,
            kallhyra,
            el,
            bredband,
            drift_rakning: None,
            vattenavgift: None,
            va: None,
            larm: None,
            saldo_innan: None,
            extra_in: None,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    /// A zero `drift_rakning` counts as absent.
    pub fn utility_charge(&self) -> UtilityCharge {
        match self.drift_rakning {
            Some(amount) if amount != 0 => UtilityCharge::TrueUp(amount),
            _ => UtilityCharge::Monthly {
                vattenavgift: self.vattenavgift.unwrap_or(0),
                va: self.va.unwrap_or(0),
                larm: self.larm.unwrap_or(0),
            },
        }
    }

    /// Running costs: electricity, broadband and utilities
    pub fn checked_drift_total(&self) -> Option<i64> {
        self.el
            .checked_add(self.bredband)?
            .checked_add(self.utility_charge().checked_total()?)
    }

    pub fn checked_credits(&self) -> Option<i64> {
        self.saldo_innan
            .unwrap_or(0)
            .checked_add(self.extra_in.unwrap_or(0))
    }

    /// The exact amount the roommates' shares must add up to, or None if the
    /// sum of the fields does not fit in an `i64`
    pub fn checked_total_cost(&self) -> Option<i64> {
        self.kallhyra
            .checked_add(self.checked_drift_total()?)?
            .checked_sub(self.checked_credits()?)
    }

    /// Saturating form of [`Config::checked_drift_total`], for display.
    pub fn drift_total(&self) -> i64 {
        self.checked_drift_total().unwrap_or(i64::MAX)
    }

    /// Credits that reduce what the tenants are billed
    pub fn credits(&self) -> i64 {
        self.checked_credits().unwrap_or(i64::MAX)
    }

    /// Saturating form of [`Config::checked_total_cost`]. Exact for every
    /// config that passes validation.
    pub fn total_cost(&self) -> i64 {
        self.checked_total_cost().unwrap_or(i64::MAX)
    }
}

/// One roommate's stay during a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OccupantStay {
    pub name: String,
    pub days: u32,

    /// Agreed premium (positive) or discount (negative) in kronor
    #[serde(default)]
    pub room_adjustment: i64,
}

impl OccupantStay {
    pub fn new(name: impl Into<String>, days: u32, room_adjustment: i64) -> Self {
        Self {
            name: name.into(),
            days,
            room_adjustment,
        }
    }
}
