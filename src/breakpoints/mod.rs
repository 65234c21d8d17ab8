//! Breakpoint Tables
//!
//! Piecewise-linear segments mapping a pollutant concentration range onto an
//! AQI range. A table is validated once when it is built and never mutated
//! afterwards, so it can be shared freely between threads.
//!
//! The built-in table is the Indian CPCB National AQI (`cpcb.rs`). A table can
//! also be loaded from JSON:
//!
//! ```json
//! {
//!   "standard": "CPCB",
//!   "pollutants": {
//!     "pm25": [{"c_low": 0, "c_high": 30, "i_low": 0, "i_high": 50}, ...]
//!   }
//! }
//! ```

mod cpcb;

use crate::error::BreakpointTableError;
use crate::pollutant::Pollutant;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One (concentration range → index range) segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: f64,
    pub i_high: f64,
}

impl Breakpoint {
    /// Linear interpolation inside (or beyond, for the top row) this segment.
    ///
    /// `I = (I_high - I_low) / (C_high - C_low) * (C - C_low) + I_low`
    pub fn interpolate(&self, concentration: f64) -> f64 {
        let slope = (self.i_high - self.i_low) / (self.c_high - self.c_low);
        slope * (concentration - self.c_low) + self.i_low
    }

    fn is_finite(&self) -> bool {
        self.c_low.is_finite()
            && self.c_high.is_finite()
            && self.i_low.is_finite()
            && self.i_high.is_finite()
    }
}

/// Breakpoints for every supported pollutant under one AQI standard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakpointTable {
    standard: String,
    pollutants: BTreeMap<Pollutant, Vec<Breakpoint>>,
}

/// On-disk layout of a breakpoint table
#[derive(Debug, Deserialize)]
struct BreakpointFile {
    standard: String,
    pollutants: BTreeMap<Pollutant, Vec<Breakpoint>>,
}

impl BreakpointTable {
    /// Build a table, checking that each pollutant's rows form a sorted,
    /// gapless partition starting at zero with non-decreasing indices.
    pub fn new(
        standard: impl Into<String>,
        pollutants: BTreeMap<Pollutant, Vec<Breakpoint>>,
    ) -> Result<Self, BreakpointTableError> {
        for (pollutant, rows) in &pollutants {
            validate_rows(*pollutant, rows)?;
        }
        Ok(Self {
            standard: standard.into(),
            pollutants,
        })
    }

    /// Indian CPCB National AQI
    pub fn cpcb() -> Self {
        let pollutants = [
            (Pollutant::Pm25, cpcb::PM25),
            (Pollutant::Pm10, cpcb::PM10),
            (Pollutant::No2, cpcb::NO2),
            (Pollutant::O3, cpcb::O3),
            (Pollutant::So2, cpcb::SO2),
            (Pollutant::Co, cpcb::CO),
        ]
        .into_iter()
        .map(|(pollutant, rows)| (pollutant, rows.to_vec()))
        .collect();

        Self {
            standard: "CPCB".to_string(),
            pollutants,
        }
    }

    /// Load and validate a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read breakpoint table: {:?}", path))?;

        let file: BreakpointFile = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse breakpoint table JSON")?;

        let table = Self::new(file.standard, file.pollutants)
            .with_context(|| format!("Invalid breakpoint table: {:?}", path))?;

        tracing::info!(
            "Loaded {} breakpoint table ({} pollutants)",
            table.standard,
            table.pollutants.len()
        );
        Ok(table)
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }

    /// Rows for a pollutant, or `None` if the standard does not cover it.
    pub fn rows(&self, pollutant: Pollutant) -> Option<&[Breakpoint]> {
        self.pollutants.get(&pollutant).map(Vec::as_slice)
    }

    pub fn pollutants(&self) -> impl Iterator<Item = Pollutant> + '_ {
        self.pollutants.keys().copied()
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::cpcb()
    }
}

/// Select the segment used for `concentration`.
///
/// On a shared boundary the segment whose `c_low` equals the value wins.
/// Values above the last `c_high` use the last segment. `None` only for an
/// empty slice.
pub fn locate(rows: &[Breakpoint], concentration: f64) -> Option<&Breakpoint> {
    let idx = rows.partition_point(|row| row.c_low <= concentration);
    rows.get(idx.saturating_sub(1))
}

fn validate_rows(pollutant: Pollutant, rows: &[Breakpoint]) -> Result<(), BreakpointTableError> {
    let first = rows.first().ok_or(BreakpointTableError::Empty { pollutant })?;
    if first.c_low != 0.0 {
        return Err(BreakpointTableError::NonZeroStart {
            pollutant,
            start: first.c_low,
        });
    }

    for (row, bp) in rows.iter().enumerate() {
        if !bp.is_finite() {
            return Err(BreakpointTableError::NonFinite { pollutant, row });
        }
        if bp.c_low >= bp.c_high || bp.i_low > bp.i_high {
            return Err(BreakpointTableError::InvertedRange { pollutant, row });
        }
    }

    for (row, pair) in rows.windows(2).enumerate() {
        if pair[0].c_high != pair[1].c_low {
            return Err(BreakpointTableError::Discontinuous { pollutant, row });
        }
        if pair[0].i_high > pair[1].i_low {
            return Err(BreakpointTableError::IndexDecreasing { pollutant, row });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bp(c_low: f64, c_high: f64, i_low: f64, i_high: f64) -> Breakpoint {
        Breakpoint { c_low, c_high, i_low, i_high }
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let table = BreakpointTable::cpcb();
        for pollutant in Pollutant::ALL {
            let rows = table.rows(pollutant).expect("every pollutant covered");
            validate_rows(pollutant, rows).unwrap();
        }
        assert_eq!(table.standard(), "CPCB");
    }

    #[test]
    fn test_locate_prefers_segment_starting_at_boundary() {
        let rows = BreakpointTable::cpcb().rows(Pollutant::Pm25).unwrap().to_vec();
        assert_eq!(locate(&rows, 30.0).unwrap().c_low, 30.0);
        assert_eq!(locate(&rows, 29.999).unwrap().c_low, 0.0);
        assert_eq!(locate(&rows, 0.0).unwrap().c_low, 0.0);
        assert_eq!(locate(&rows, 10_000.0).unwrap().c_low, 250.0);
        assert_eq!(locate(&[], 10.0), None);
    }

    #[test]
    fn test_interpolate_formula() {
        let row = bp(120.0, 250.0, 300.0, 400.0);
        assert_relative_eq!(row.interpolate(135.0), 311.538_461, epsilon = 1e-5);
        // Extrapolation keeps the segment's slope
        let top = bp(250.0, 380.0, 400.0, 500.0);
        assert_relative_eq!(top.interpolate(510.0), 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_gap() {
        let rows = vec![bp(0.0, 30.0, 0.0, 50.0), bp(31.0, 60.0, 51.0, 100.0)];
        let err = BreakpointTable::new("X", [(Pollutant::Pm25, rows)].into_iter().collect())
            .unwrap_err();
        assert_eq!(
            err,
            BreakpointTableError::Discontinuous {
                pollutant: Pollutant::Pm25,
                row: 0
            }
        );
    }

    #[test]
    fn test_rejects_overlap_and_bad_start() {
        let overlap = vec![bp(0.0, 30.0, 0.0, 50.0), bp(25.0, 60.0, 50.0, 100.0)];
        assert!(matches!(
            BreakpointTable::new("X", [(Pollutant::No2, overlap)].into_iter().collect()),
            Err(BreakpointTableError::Discontinuous { .. })
        ));

        let late_start = vec![bp(5.0, 30.0, 0.0, 50.0)];
        assert!(matches!(
            BreakpointTable::new("X", [(Pollutant::No2, late_start)].into_iter().collect()),
            Err(BreakpointTableError::NonZeroStart { .. })
        ));

        let empty = Vec::new();
        assert!(matches!(
            BreakpointTable::new("X", [(Pollutant::Co, empty)].into_iter().collect()),
            Err(BreakpointTableError::Empty { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_and_decreasing_index() {
        let inverted = vec![bp(0.0, 0.0, 0.0, 50.0)];
        assert!(matches!(
            BreakpointTable::new("X", [(Pollutant::O3, inverted)].into_iter().collect()),
            Err(BreakpointTableError::InvertedRange { row: 0, .. })
        ));

        let decreasing = vec![bp(0.0, 30.0, 0.0, 60.0), bp(30.0, 60.0, 50.0, 100.0)];
        assert!(matches!(
            BreakpointTable::new("X", [(Pollutant::O3, decreasing)].into_iter().collect()),
            Err(BreakpointTableError::IndexDecreasing { row: 0, .. })
        ));
    }

    #[test]
    fn test_load_from_json() {
        let dir = std::env::temp_dir().join(format!("aqi_engine_bp_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("table.json");
        fs::write(
            &path,
            r#"{
                "standard": "TEST",
                "pollutants": {
                    "PM2.5": [
                        {"c_low": 0, "c_high": 10, "i_low": 0, "i_high": 50},
                        {"c_low": 10, "c_high": 20, "i_low": 50, "i_high": 100}
                    ]
                }
            }"#,
        )
        .unwrap();

        let table = BreakpointTable::load(&path).unwrap();
        assert_eq!(table.standard(), "TEST");
        assert_eq!(table.rows(Pollutant::Pm25).unwrap().len(), 2);
        assert!(table.rows(Pollutant::Co).is_none());

        fs::write(&path, r#"{"standard": "BAD", "pollutants": {"pm25": [{"c_low": 3, "c_high": 10, "i_low": 0, "i_high": 50}]}}"#).unwrap();
        assert!(BreakpointTable::load(&path).is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
