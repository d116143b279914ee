use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use super::storage::{load_history, save_history};
use super::types::{HistoryRecord, RentHistory};
use crate::rent::Period;

/// Where finished months are kept.
///
/// A store accepts at most one record per period; `put` fails for a period
/// that is already recorded. The allocation engine never sees a store, only
/// its callers do.
pub trait HistoryStore {
    fn get(&self, period: Period) -> Result<Option<HistoryRecord>>;
    fn latest(&self) -> Result<Option<HistoryRecord>>;
    /// All records, oldest first
    fn list(&self) -> Result<Vec<HistoryRecord>>;
    fn put(&mut self, record: HistoryRecord) -> Result<()>;
}

impl HistoryStore for RentHistory {
    fn get(&self, period: Period) -> Result<Option<HistoryRecord>> {
        Ok(RentHistory::get(self, period).cloned())
    }

    fn latest(&self) -> Result<Option<HistoryRecord>> {
        Ok(RentHistory::latest(self).cloned())
    }

    fn list(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.records().cloned().collect())
    }

    fn put(&mut self, record: HistoryRecord) -> Result<()> {
        self.record(record)
    }
}

/// History kept in a JSON file, re-read on every call.
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonHistoryStore {
    fn get(&self, period: Period) -> Result<Option<HistoryRecord>> {
        Ok(load_history(&self.path)?.get(period).cloned())
    }

    fn latest(&self) -> Result<Option<HistoryRecord>> {
        Ok(load_history(&self.path)?.latest().cloned())
    }

    fn list(&self) -> Result<Vec<HistoryRecord>> {
        Ok(load_history(&self.path)?.records().cloned().collect())
    }

    fn put(&mut self, record: HistoryRecord) -> Result<()> {
        let mut history = load_history(&self.path)?;
        let period = record.period;
        let total_cost = record.result.total_cost;
        history.record(record)?;
        save_history(&self.path, &history)?;

        info!(
            period = %period,
            total_cost,
            path = %self.path.display(),
            "Rent history recorded"
        );
        Ok(())
    }
}
