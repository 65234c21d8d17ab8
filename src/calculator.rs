//! AQI Calculator
//!
//! Converts pollutant concentrations to sub-indices with the breakpoint table,
//! aggregates them into a composite AQI and maps values onto categories.
//!
//! The calculator owns its tables and never mutates them, so one instance can
//! be built at startup and shared by reference (or `Arc`) across threads.

use crate::breakpoints::{locate, BreakpointTable};
use crate::category::Category;
use crate::error::AqiError;
use crate::pollutant::{Pollutant, PollutantReading};
use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Largest sub-index representable in the `u32` result.
const MAX_INDEX: f64 = u32::MAX as f64;

/// Sub-indices for one reading; at most one per pollutant.
pub type SubIndices = SmallVec<[SubIndex; 6]>;

/// A single pollutant's contribution to the AQI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    pub concentration: f64,
    pub index: u32,
    pub category: Category,
}

/// Reported AQI for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeAqi {
    pub aqi: u32,
    pub dominant_pollutant: Pollutant,
}

#[derive(Debug, Clone, Default)]
pub struct AqiCalculator {
    table: BreakpointTable,
}

impl AqiCalculator {
    pub fn new(table: BreakpointTable) -> Self {
        Self { table }
    }

    /// Calculator over the built-in CPCB table.
    pub fn cpcb() -> Self {
        Self::new(BreakpointTable::cpcb())
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Sub-index for one concentration.
    ///
    /// Above the highest breakpoint the top segment's slope is extended rather
    /// than clamped at its maximum index. A concentration whose extrapolated
    /// index does not fit in `u32` is `InvalidConcentration`.
    pub fn calculate_individual_aqi(
        &self,
        concentration: f64,
        pollutant: Pollutant,
    ) -> Result<u32, AqiError> {
        let rows = self
            .table
            .rows(pollutant)
            .ok_or_else(|| AqiError::unknown(pollutant.key()))?;

        if !concentration.is_finite() || concentration < 0.0 {
            return Err(AqiError::InvalidConcentration {
                pollutant,
                value: concentration,
            });
        }

        let segment =
            locate(rows, concentration).ok_or_else(|| AqiError::unknown(pollutant.key()))?;
        let index = segment.interpolate(concentration);
        if index + 0.5 >= MAX_INDEX {
            return Err(AqiError::InvalidConcentration {
                pollutant,
                value: concentration,
            });
        }
        Ok(round_half_up(index))
    }

    /// Sub-index plus category for one concentration.
    pub fn sub_index(&self, concentration: f64, pollutant: Pollutant) -> Result<SubIndex, AqiError> {
        let index = self.calculate_individual_aqi(concentration, pollutant)?;
        Ok(SubIndex {
            pollutant,
            concentration,
            index,
            category: Category::from_aqi(f64::from(index))?,
        })
    }

    /// Sub-indices for every present pollutant, in priority order.
    ///
    /// Fails with `EmptyReading` when nothing is present, or with the first
    /// per-pollutant error.
    pub fn sub_indices(&self, reading: &PollutantReading) -> Result<SubIndices, AqiError> {
        let subs = reading
            .present()
            .map(|(pollutant, value)| self.sub_index(value, pollutant))
            .collect::<Result<SubIndices, _>>()?;

        if subs.is_empty() {
            return Err(AqiError::EmptyReading);
        }
        Ok(subs)
    }

    /// Composite AQI: the highest sub-index and the pollutant producing it.
    pub fn calculate_composite_aqi(&self, reading: &PollutantReading) -> Result<CompositeAqi, AqiError> {
        let subs = self.sub_indices(reading)?;
        let dominant = select_dominant(&subs).ok_or(AqiError::EmptyReading)?;
        Ok(CompositeAqi {
            aqi: dominant.index,
            dominant_pollutant: dominant.pollutant,
        })
    }

    /// Category band for an AQI value.
    pub fn get_aqi_category(&self, aqi: f64) -> Result<Category, AqiError> {
        Category::from_aqi(aqi)
    }
}

/// Pick the dominant sub-index.
///
/// Highest index wins; equal indices go to the pollutant with the higher
/// health-severity priority (PM2.5 > PM10 > NO2 > O3 > SO2 > CO).
pub fn select_dominant(subs: &[SubIndex]) -> Option<&SubIndex> {
    subs.iter().max_by(|a, b| compare_severity(a, b))
}

fn compare_severity(a: &SubIndex, b: &SubIndex) -> Ordering {
    a.index
        .cmp(&b.index)
        .then_with(|| b.pollutant.priority().cmp(&a.pollutant.priority()))
}

/// Round half up to the nearest integer.
///
/// The epsilon absorbs representation error from the slope division so that
/// exact halves in the reference tables (e.g. 112.5) round up.
fn round_half_up(value: f64) -> u32 {
    (value + 0.5 + 1e-9).floor() as u32
}
