use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rent::{
    calculate_rent, validate, AllocationResult, Config, ConfigError, OccupantStay, Period,
};

/// One stored month: the result plus the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub period: Period,
    pub config: Config,
    pub roommates: Vec<OccupantStay>,
    pub result: AllocationResult,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(config: Config, roommates: Vec<OccupantStay>, result: AllocationResult) -> Self {
        Self {
            period: result.period,
            config,
            roommates,
            result,
            recorded_at: Utc::now(),
        }
    }

    /// Validate and allocate a period, keeping the normalized config the
    /// engine actually used.
    pub fn calculate(config: &Config, roommates: Vec<OccupantStay>) -> Result<Self, ConfigError> {
        let config = validate(config, &roommates)?;
        let result = calculate_rent(&config, &roommates)?;
        Ok(Self::new(config, roommates, result))
    }
}

/// All recorded months, keyed by "YYYY-MM".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentHistory {
    pub version: u32,
    #[serde(default)]
    pub records: BTreeMap<String, HistoryRecord>,
}

impl Default for RentHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RentHistory {
    /// Create a new empty history with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            records: BTreeMap::new(),
        }
    }

    pub fn get(&self, period: Period) -> Option<&HistoryRecord> {
        self.records.get(&period.key())
    }

    /// Most recent month on record
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.values().next_back()
    }

    /// Records in chronological order
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.values()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a month. Each period can be recorded once; recorded months are
    /// never overwritten.
    pub fn record(&mut self, record: HistoryRecord) -> Result<()> {
        let key = record.period.key();
        if self.records.contains_key(&key) {
            anyhow::bail!("Rent for {} is already recorded", key);
        }
        self.records.insert(key, record);
        Ok(())
    }
}
