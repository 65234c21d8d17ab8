//! Engine configuration
//!
//! Read once from the environment at startup:
//! - `AQI_BREAKPOINTS`: optional path to a JSON breakpoint table (default: built-in CPCB)
//! - `AQI_PARALLEL_MIN_POINTS`: forecast length at which enrichment goes parallel (default: 64)

use crate::breakpoints::BreakpointTable;
use crate::calculator::AqiCalculator;
use crate::forecast::DEFAULT_PARALLEL_MIN_POINTS;
use anyhow::Result;
use std::path::PathBuf;

pub const BREAKPOINTS_VAR: &str = "AQI_BREAKPOINTS";
pub const PARALLEL_MIN_POINTS_VAR: &str = "AQI_PARALLEL_MIN_POINTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub breakpoints_path: Option<PathBuf>,
    pub parallel_min_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoints_path: None,
            parallel_min_points: DEFAULT_PARALLEL_MIN_POINTS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; malformed values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let breakpoints_path = lookup(BREAKPOINTS_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let parallel_min_points = match lookup(PARALLEL_MIN_POINTS_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Ignoring {}={:?}, using {}",
                    PARALLEL_MIN_POINTS_VAR,
                    raw,
                    DEFAULT_PARALLEL_MIN_POINTS
                );
                DEFAULT_PARALLEL_MIN_POINTS
            }),
            None => DEFAULT_PARALLEL_MIN_POINTS,
        };

        Self {
            breakpoints_path,
            parallel_min_points,
        }
    }

    /// Load the configured breakpoint table and wrap it in a calculator.
    pub fn build_calculator(&self) -> Result<AqiCalculator> {
        let table = match &self.breakpoints_path {
            Some(path) => BreakpointTable::load(path)?,
            None => {
                tracing::info!("Using built-in CPCB breakpoint table");
                BreakpointTable::cpcb()
            }
        };
        Ok(AqiCalculator::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.build_calculator().unwrap().table().standard(), "CPCB");
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = EngineConfig::from_lookup(lookup(&[
            (BREAKPOINTS_VAR, "/etc/aqi/table.json"),
            (PARALLEL_MIN_POINTS_VAR, "8"),
        ]));
        assert_eq!(config.breakpoints_path, Some(PathBuf::from("/etc/aqi/table.json")));
        assert_eq!(config.parallel_min_points, 8);

        let config = EngineConfig::from_lookup(lookup(&[
            (BREAKPOINTS_VAR, "  "),
            (PARALLEL_MIN_POINTS_VAR, "many"),
        ]));
        assert_eq!(config.breakpoints_path, None);
        assert_eq!(config.parallel_min_points, DEFAULT_PARALLEL_MIN_POINTS);
    }

    #[test]
    fn test_missing_table_file_is_an_error() {
        let config = EngineConfig {
            breakpoints_path: Some(PathBuf::from("/nonexistent/aqi_breakpoints.json")),
            ..EngineConfig::default()
        };
        let err = config.build_calculator().unwrap_err();
        assert!(err.to_string().contains("Failed to read breakpoint table"));
    }
}
