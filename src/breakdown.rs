//! Pollutant Breakdown Reporter
//!
//! Per-pollutant sub-index, category and health impact for one reading, with
//! the dominant pollutant flagged by the same rule the composite AQI uses.

use crate::calculator::{select_dominant, AqiCalculator};
use crate::category::Category;
use crate::error::AqiError;
use crate::pollutant::{Pollutant, PollutantReading};
use serde::Serialize;
use std::collections::BTreeMap;

/// Breakdown entry for one pollutant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantBreakdown {
    pub value: f64,
    pub unit: &'static str,
    pub index: u32,
    pub category: Category,
    pub health_impact: &'static str,
    pub is_dominant: bool,
}

/// Fixed health-impact description for a pollutant.
pub fn health_impact(pollutant: Pollutant) -> &'static str {
    match pollutant {
        Pollutant::Pm25 => "Respiratory and cardiovascular effects",
        Pollutant::Pm10 => "Respiratory irritation, reduced lung function",
        Pollutant::No2 => "Respiratory inflammation, reduced immunity",
        Pollutant::O3 => "Respiratory irritation, chest pain",
        Pollutant::So2 => "Respiratory problems, eye irritation",
        Pollutant::Co => "Reduced oxygen delivery, heart problems",
    }
}

impl AqiCalculator {
    /// Break a reading down per pollutant.
    ///
    /// Exactly one entry has `is_dominant = true`, and it is always the
    /// pollutant `calculate_composite_aqi` reports for the same reading.
    pub fn breakdown(
        &self,
        reading: &PollutantReading,
    ) -> Result<BTreeMap<Pollutant, PollutantBreakdown>, AqiError> {
        let subs = self.sub_indices(reading)?;
        let dominant = select_dominant(&subs)
            .map(|s| s.pollutant)
            .ok_or(AqiError::EmptyReading)?;

        Ok(subs
            .iter()
            .map(|sub| {
                let entry = PollutantBreakdown {
                    value: sub.concentration,
                    unit: sub.pollutant.unit(),
                    index: sub.index,
                    category: sub.category,
                    health_impact: health_impact(sub.pollutant),
                    is_dominant: sub.pollutant == dominant,
                };
                (sub.pollutant, entry)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_entries() {
        let calc = AqiCalculator::cpcb();
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, 135.0)
            .with(Pollutant::Pm10, 180.0)
            .with(Pollutant::No2, 40.0);
        let report = calc.breakdown(&reading).unwrap();

        assert_eq!(report.len(), 3);
        let pm25 = &report[&Pollutant::Pm25];
        assert_eq!(pm25.index, 312);
        assert_eq!(pm25.category, Category::VeryPoor);
        assert!(pm25.is_dominant);
        assert_eq!(pm25.unit, "µg/m³");

        let pm10 = &report[&Pollutant::Pm10];
        assert_eq!(pm10.index, 153);
        assert_eq!(pm10.category, Category::Moderate);
        assert!(!pm10.is_dominant);

        assert_eq!(report[&Pollutant::No2].health_impact, health_impact(Pollutant::No2));
    }

    #[test]
    fn test_breakdown_single_dominant_on_tie() {
        let calc = AqiCalculator::cpcb();
        let reading = PollutantReading::new()
            .with(Pollutant::Co, 1.0)
            .with(Pollutant::O3, 50.0)
            .with(Pollutant::So2, 40.0);
        let report = calc.breakdown(&reading).unwrap();

        let dominant: Vec<_> = report.iter().filter(|(_, b)| b.is_dominant).map(|(p, _)| *p).collect();
        assert_eq!(dominant, vec![Pollutant::O3]);
        assert_eq!(
            calc.calculate_composite_aqi(&reading).unwrap().dominant_pollutant,
            Pollutant::O3
        );
    }

    #[test]
    fn test_breakdown_skips_nulls_and_rejects_empty() {
        let calc = AqiCalculator::cpcb();
        let mut reading = PollutantReading::new().with(Pollutant::Co, 0.8);
        reading.set(Pollutant::Pm10, None);
        let report = calc.breakdown(&reading).unwrap();
        assert_eq!(report.keys().copied().collect::<Vec<_>>(), vec![Pollutant::Co]);
        assert_eq!(report[&Pollutant::Co].unit, "mg/m³");

        assert_eq!(calc.breakdown(&PollutantReading::new()), Err(AqiError::EmptyReading));
    }
}
