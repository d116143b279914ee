use thiserror::Error;

/// Input defects that stop a rent calculation before any allocation happens.
///
/// Every variant names the offending field or occupant so the caller can fix
/// the period file without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid period {year}-{month:02}: month must be between 1 and 12")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("{field}: must be non-negative (got {value})")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("drift_rakning and {field} are both set: a period uses either the quarterly invoice or the monthly fees, not both")]
    ConflictingFeeSpecification { field: &'static str },

    #[error("{field}: amounts too large to allocate in whole kronor")]
    AmountOutOfRange { field: &'static str },

    #[error("credits exceed the period's costs: total to bill is {total}")]
    NegativeTotal { total: i64 },

    #[error("no roommates provided")]
    NoOccupants,

    #[error("invalid days for {name}: {days} (must be between 0 and {days_in_month})")]
    InvalidOccupancy {
        name: String,
        days: u32,
        days_in_month: u32,
    },

    #[error("duplicate roommate name: {name}")]
    DuplicateOccupant { name: String },

    #[error("total occupancy is zero: nobody stayed during the period")]
    NoOccupancy,
}
