//! Split a household's monthly costs across roommates.
//!
//! The [`rent`] module holds the allocation engine: validation, occupancy
//! weights, and an integer-exact split that honours room adjustments. The
//! remaining modules are the caller side used by the `hyra` binary: period
//! files, the rent history store, and output formatting.

pub mod config;
pub mod history;
pub mod output;
pub mod rent;
