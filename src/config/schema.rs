use serde::{Deserialize, Serialize};

use crate::rent::{Config, OccupantStay};

/// A period file: the month's costs plus who lived in the house.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodFile {
    pub config: Config,
    pub roommates: Vec<RoommateEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoommateEntry {
    pub name: String,
    /// Defaults to the whole month when omitted
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub room_adjustment: i64,
}

impl PeriodFile {
    /// Resolve omitted days to the full month and hand back engine inputs.
    pub fn into_parts(self) -> (Config, Vec<OccupantStay>) {
        // An invalid month leaves days at 0; validation reports the period itself
        let full_month = self.config.period().days_in_month().unwrap_or(0);
        let stays = self
            .roommates
            .into_iter()
            .map(|entry| OccupantStay {
                name: entry.name,
                days: entry.days.unwrap_or(full_month),
                room_adjustment: entry.room_adjustment,
            })
            .collect();
        (self.config, stays)
    }
}
