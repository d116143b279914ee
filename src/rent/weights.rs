use std::collections::BTreeMap;

use super::config::OccupantStay;
use super::error::ConfigError;

/// Pro-rata occupancy weights for one period.
///
/// Weights are kept as exact day counts over the household's total days, so
/// the allocation engine can work without floating point. `weight()` gives the
/// normalized `f64` for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyWeights {
    days: BTreeMap<String, u32>,
    total_days: u64,
}

impl OccupancyWeights {
    /// Sum of days over all roommates; always positive
    pub fn total_days(&self) -> u64 {
        self.total_days
    }

    pub fn days(&self, name: &str) -> Option<u32> {
        self.days.get(name).copied()
    }

    /// Normalized weight in [0, 1]
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.days
            .get(name)
            .map(|&days| days as f64 / self.total_days as f64)
    }

    pub fn weights(&self) -> BTreeMap<String, f64> {
        self.days
            .iter()
            .map(|(name, &days)| (name.clone(), days as f64 / self.total_days as f64))
            .collect()
    }

    /// Roommates and their days, in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.days.iter().map(|(name, &days)| (name.as_str(), days))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Convert days stayed into weights relative to the household's total days.
///
/// The denominator is the sum of everyone's days, not the month length, so a
/// lone roommate with a partial stay still carries the whole cost. Roommates
/// with zero days stay in the set with weight 0.
pub fn calculate_weights(stays: &[OccupantStay]) -> Result<OccupancyWeights, ConfigError> {
    if stays.is_empty() {
        return Err(ConfigError::NoOccupants);
    }

    let mut days = BTreeMap::new();
    for stay in stays {
        if days.insert(stay.name.clone(), stay.days).is_some() {
            return Err(ConfigError::DuplicateOccupant {
                name: stay.name.clone(),
            });
        }
    }

    let total_days: u64 = days.values().map(|&d| u64::from(d)).sum();
    if total_days == 0 {
        return Err(ConfigError::NoOccupancy);
    }

    Ok(OccupancyWeights { days, total_days })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_stays() {
        let stays = vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Bob", 30, 0),
        ];
        let weights = calculate_weights(&stays).unwrap();
        assert_eq!(weights.weight("Alice"), Some(0.5));
        assert_eq!(weights.weight("Bob"), Some(0.5));
        assert_eq!(weights.total_days(), 60);
    }

    #[test]
    fn test_partial_stays() {
        let stays = vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Bob", 15, 0),
        ];
        let weights = calculate_weights(&stays).unwrap();
        assert!((weights.weight("Alice").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((weights.weight("Bob").unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let stays = vec![
            OccupantStay::new("Alice", 20, 0),
            OccupantStay::new("Bob", 15, 0),
            OccupantStay::new("Charlie", 10, 0),
        ];
        let weights = calculate_weights(&stays).unwrap();
        let sum: f64 = weights.weights().values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_partial_stay_carries_everything() {
        let stays = vec![OccupantStay::new("Alice", 12, 0)];
        let weights = calculate_weights(&stays).unwrap();
        assert_eq!(weights.weight("Alice"), Some(1.0));
    }

    #[test]
    fn test_zero_day_occupant_is_retained() {
        let stays = vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Bob", 0, 0),
        ];
        let weights = calculate_weights(&stays).unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.weight("Bob"), Some(0.0));
        assert_eq!(weights.weight("Alice"), Some(1.0));
    }

    #[test]
    fn test_zero_total_occupancy() {
        let stays = vec![
            OccupantStay::new("Alice", 0, 0),
            OccupantStay::new("Bob", 0, 0),
        ];
        assert_eq!(calculate_weights(&stays).unwrap_err(), ConfigError::NoOccupancy);
    }

    #[test]
    fn test_empty_stays() {
        assert_eq!(calculate_weights(&[]).unwrap_err(), ConfigError::NoOccupants);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let stays = vec![
            OccupantStay::new("Charlie", 10, 0),
            OccupantStay::new("Alice", 20, 0),
        ];
        let weights = calculate_weights(&stays).unwrap();
        let names: Vec<&str> = weights.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alice", "Charlie"]);
    }
}
