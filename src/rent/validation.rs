use std::collections::HashSet;

use super::config::{Config, OccupantStay, UtilityCharge};
use super::error::ConfigError;

/// Validate a period's costs and roommates before any allocation work.
///
/// Returns a normalized copy of the config: a zero `drift_rakning` is dropped,
/// and the monthly fee trio is either filled in with zeros (monthly period) or
/// cleared (quarterly-invoice period). Fails with the first violation found.
pub fn validate(config: &Config, stays: &[OccupantStay]) -> Result<Config, ConfigError> {
    if let Some(error) = collect_errors(config, stays).into_iter().next() {
        return Err(error);
    }
    Ok(normalize(config))
}

/// Collect every validation error at once (not just the first).
pub fn collect_errors(config: &Config, stays: &[OccupantStay]) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let period = config.period();
    let days_in_month = period.days_in_month();
    if days_in_month.is_none() {
        errors.push(ConfigError::InvalidPeriod {
            year: config.year,
            month: config.month,
        });
    }

    let amounts = [
        ("kallhyra", Some(config.kallhyra)),
        ("el", Some(config.el)),
        ("bredband", Some(config.bredband)),
        ("drift_rakning", config.drift_rakning),
        ("vattenavgift", config.vattenavgift),
        ("va", config.va),
        ("larm", config.larm),
        ("saldo_innan", config.saldo_innan),
        ("extra_in", config.extra_in),
    ];
    let mut amounts_valid = true;
    for (field, value) in amounts {
        if let Some(value) = value {
            if value < 0 {
                errors.push(ConfigError::NegativeAmount { field, value });
                amounts_valid = false;
            }
        }
    }

    if let UtilityCharge::TrueUp(_) = config.utility_charge() {
        let fees = [
            ("vattenavgift", config.vattenavgift),
            ("va", config.va),
            ("larm", config.larm),
        ];
        for (field, value) in fees {
            if value.unwrap_or(0) != 0 {
                errors.push(ConfigError::ConflictingFeeSpecification { field });
            }
        }
    }

    if amounts_valid {
        errors.extend(check_range(config, stays));
    }

    if stays.is_empty() {
        errors.push(ConfigError::NoOccupants);
    }

    // Range checks need a real month to compare against
    if let Some(days_in_month) = days_in_month {
        for stay in stays {
            if stay.days > days_in_month {
                errors.push(ConfigError::InvalidOccupancy {
                    name: stay.name.clone(),
                    days: stay.days,
                    days_in_month,
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for stay in stays {
        if !seen.insert(stay.name.as_str()) {
            errors.push(ConfigError::DuplicateOccupant {
                name: stay.name.clone(),
            });
        }
    }

    errors
}

/// The billed total must fit in an `i64` and not be negative. Every share is
/// bounded by `total + 2 × Σ|adj|`, so that bound must fit as well.
fn check_range(config: &Config, stays: &[OccupantStay]) -> Option<ConfigError> {
    let total = match config.checked_total_cost() {
        Some(total) if total < 0 => return Some(ConfigError::NegativeTotal { total }),
        Some(total) => total,
        None => {
            return Some(ConfigError::AmountOutOfRange {
                field: "total_cost",
            })
        }
    };

    let adjustments: i128 = stays
        .iter()
        .map(|stay| i128::from(stay.room_adjustment.unsigned_abs()))
        .sum();
    if i128::from(total) + 2 * adjustments > i128::from(i64::MAX) {
        return Some(ConfigError::AmountOutOfRange {
            field: "room_adjustment",
        });
    }
    None
}

fn normalize(config: &Config) -> Config {
    let mut normalized = config.clone();
    match config.utility_charge() {
        UtilityCharge::TrueUp(_) => {
            normalized.vattenavgift = None;
            normalized.va = None;
            normalized.larm = None;
        }
        UtilityCharge::Monthly {
            vattenavgift,
            va,
            larm,
        } => {
            normalized.drift_rakning = None;
            normalized.vattenavgift = Some(vattenavgift);
            normalized.va = Some(va);
            normalized.larm = Some(larm);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::new(2024, 11, 24_530, 1_600, 400)
    }

    fn roommates() -> Vec<OccupantStay> {
        vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Bob", 15, -200),
        ]
    }

    #[test]
    fn test_valid_config() {
        let mut config = base_config();
        config.drift_rakning = Some(2_612);
        assert!(validate(&config, &roommates()).is_ok());
    }

    #[test]
    fn test_empty_fees_are_valid() {
        let validated = validate(&base_config(), &roommates()).unwrap();
        assert_eq!(validated.vattenavgift, Some(0));
        assert_eq!(validated.va, Some(0));
        assert_eq!(validated.larm, Some(0));
        assert_eq!(validated.drift_rakning, None);
    }

    #[test]
    fn test_normalize_clears_zero_fees_in_true_up_period() {
        let mut config = base_config();
        config.drift_rakning = Some(2_612);
        config.vattenavgift = Some(0);
        let validated = validate(&config, &roommates()).unwrap();
        assert_eq!(validated.drift_rakning, Some(2_612));
        assert_eq!(validated.vattenavgift, None);
        assert_eq!(validated.total_cost(), config.total_cost());
    }

    #[test]
    fn test_conflicting_fee_specification() {
        let mut config = base_config();
        config.drift_rakning = Some(2_612);
        config.vattenavgift = Some(375);
        let result = validate(&config, &roommates());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::ConflictingFeeSpecification {
                field: "vattenavgift"
            }
        );
    }

    #[test]
    fn test_conflict_message_names_field() {
        let mut config = base_config();
        config.drift_rakning = Some(2_612);
        config.larm = Some(150);
        let errors = collect_errors(&config, &roommates());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("larm"));
    }

    #[test]
    fn test_negative_amount() {
        let mut config = base_config();
        config.el = -1;
        let result = validate(&config, &roommates());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::NegativeAmount {
                field: "el",
                value: -1
            }
        );
    }

    #[test]
    fn test_no_occupants() {
        let result = validate(&base_config(), &[]);
        assert_eq!(result.unwrap_err(), ConfigError::NoOccupants);
    }

    #[test]
    fn test_days_exceeding_month_length() {
        let stays = vec![OccupantStay::new("Alice", 31, 0)];
        let result = validate(&base_config(), &stays);
        let error = result.unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidOccupancy {
                name: "Alice".to_string(),
                days: 31,
                days_in_month: 30
            }
        );
        assert!(error.to_string().contains("invalid days for Alice"));
    }

    #[test]
    fn test_leap_day_is_valid() {
        let config = Config::new(2024, 2, 10_000, 0, 0);
        let stays = vec![OccupantStay::new("Alice", 29, 0)];
        assert!(validate(&config, &stays).is_ok());
    }

    #[test]
    fn test_zero_days_is_valid() {
        let stays = vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Bob", 0, 0),
        ];
        assert!(validate(&base_config(), &stays).is_ok());
    }

    #[test]
    fn test_duplicate_occupant() {
        let stays = vec![
            OccupantStay::new("Alice", 30, 0),
            OccupantStay::new("Alice", 10, 0),
        ];
        let result = validate(&base_config(), &stays);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateOccupant {
                name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_period() {
        let config = Config::new(2024, 13, 10_000, 0, 0);
        let result = validate(&config, &roommates());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidPeriod {
                year: 2024,
                month: 13
            }
        );
    }

    #[test]
    fn test_total_cost_overflow() {
        let config = Config::new(2024, 11, i64::MAX, 1, 0);
        let stays = vec![OccupantStay::new("A", 30, 0)];
        assert_eq!(
            validate(&config, &stays).unwrap_err(),
            ConfigError::AmountOutOfRange {
                field: "total_cost"
            }
        );
    }

    #[test]
    fn test_total_cost_at_limit_is_valid() {
        let config = Config::new(2024, 11, i64::MAX - 1, 1, 0);
        let stays = vec![OccupantStay::new("A", 30, 0)];
        assert!(validate(&config, &stays).is_ok());
    }

    #[test]
    fn test_room_adjustment_out_of_range() {
        let config = Config::new(2024, 11, i64::MAX / 2, 0, 0);
        let stays = vec![
            OccupantStay::new("A", 30, i64::MIN),
            OccupantStay::new("B", 30, 0),
        ];
        assert_eq!(
            validate(&config, &stays).unwrap_err(),
            ConfigError::AmountOutOfRange {
                field: "room_adjustment"
            }
        );
    }

    #[test]
    fn test_credits_larger_than_costs() {
        let mut config = Config::new(2024, 11, 1_000, 0, 0);
        config.saldo_innan = Some(800);
        config.extra_in = Some(300);
        assert_eq!(
            validate(&config, &roommates()).unwrap_err(),
            ConfigError::NegativeTotal { total: -100 }
        );
    }

    #[test]
    fn test_credits_equal_to_costs_are_valid() {
        let mut config = Config::new(2024, 11, 1_000, 0, 0);
        config.extra_in = Some(1_000);
        assert_eq!(validate(&config, &roommates()).unwrap().total_cost(), 0);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = base_config();
        config.kallhyra = -10; // Error 1
        config.drift_rakning = Some(2_612);
        config.va = Some(300); // Error 2
        let stays = vec![
            OccupantStay::new("Alice", 40, 0), // Error 3
            OccupantStay::new("Alice", 10, 0), // Error 4
        ];
        let errors = collect_errors(&config, &stays);
        assert_eq!(errors.len(), 4);
    }
}
