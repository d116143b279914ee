mod schema;

pub use schema::{PeriodFile, RoommateEntry};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::rent::{Config, OccupantStay};

/// Get the config directory path (~/.config/hyra/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("hyra"))
}

/// Parse a period file from YAML text
pub fn parse_period(content: &str) -> Result<(Config, Vec<OccupantStay>)> {
    let file: PeriodFile =
        serde_saphyr::from_str(content).context("Failed to parse period file: invalid YAML")?;
    Ok(file.into_parts())
}

/// Load a period file (costs and roommates for one month)
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
///
/// Semantic checks (fee conflicts, occupancy ranges) are left to
/// [`crate::rent::validate`].
pub fn load_period(path: &Path) -> Result<(Config, Vec<OccupantStay>)> {
    if !path.exists() {
        anyhow::bail!("Period file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read period file at {}", path.display()))?;

    parse_period(&content).with_context(|| format!("Invalid period file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const JANUARY: &str = r#"
config:
  year: 2025
  month: 1
  kallhyra: 24530
  el: 1600
  bredband: 400
  drift_rakning: 2612
roommates:
  - name: Fredrik
  - name: Astrid
    room_adjustment: -1400
  - name: Elvira
    days: 8
"#;

    #[test]
    fn test_parse_period_defaults_days_to_full_month() {
        let (config, stays) = parse_period(JANUARY).unwrap();
        assert_eq!(config.kallhyra, 24_530);
        assert_eq!(config.drift_rakning, Some(2_612));
        assert_eq!(stays.len(), 3);
        assert_eq!(stays[0].days, 31);
        assert_eq!(stays[0].room_adjustment, 0);
        assert_eq!(stays[1].room_adjustment, -1_400);
        assert_eq!(stays[2].days, 8);
    }

    #[test]
    fn test_parse_period_rejects_unknown_fields() {
        let yaml = r#"
config:
  year: 2025
  month: 1
  kallhyra: 24530
  el: 1600
  bredband: 400
roommates:
  - name: Fredrik
    deposit: 5000
"#;
        assert!(parse_period(yaml).is_err());
    }

    #[test]
    fn test_load_missing_period_file() {
        let path = env::temp_dir().join("hyra_test_missing_period.yaml");
        let _ = fs::remove_file(&path);
        let err = load_period(&path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_period_from_disk() {
        let path = env::temp_dir().join("hyra_test_period.yaml");
        fs::write(&path, JANUARY).unwrap();

        let (config, stays) = load_period(&path).unwrap();
        assert_eq!(config.period().to_string(), "2025-01");
        assert_eq!(stays.len(), 3);

        let _ = fs::remove_file(&path);
    }
}
