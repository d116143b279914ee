pub mod config;
pub mod engine;
pub mod error;
pub mod result;
pub mod validation;
pub mod weights;

pub use config::{Config, OccupantStay, Period, UtilityCharge};
pub use engine::{allocate, calculate_rent};
pub use error::ConfigError;
pub use result::{AllocationResult, CostBreakdown, ShareDetail};
pub use validation::{collect_errors, validate};
pub use weights::{calculate_weights, OccupancyWeights};
