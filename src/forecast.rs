//! Forecast Enrichment Pipeline
//!
//! Applies the calculator to every point of a predicted pollutant trajectory.
//! Points are independent: a malformed point is reported with an error marker
//! and the rest of the forecast is still rated. Output order always matches
//! input order, whether evaluated sequentially or with Rayon.

use crate::calculator::{AqiCalculator, CompositeAqi};
use crate::category::{Category, CategoryInfo};
use crate::error::AqiError;
use crate::pollutant::{Pollutant, PollutantReading, RawReading};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sequences at least this long are enriched in parallel by default.
pub const DEFAULT_PARALLEL_MIN_POINTS: usize = 64;

/// One predicted time step, as produced by the forecasting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Hours ahead of the forecast origin
    pub offset_hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub reading: RawReading,
}

impl ForecastPoint {
    pub fn new(offset_hours: u32, reading: RawReading) -> Self {
        Self {
            offset_hours,
            timestamp: None,
            reading,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Result of rating one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PointOutcome {
    Rated {
        aqi: u32,
        dominant_pollutant: Pollutant,
        category: CategoryInfo,
    },
    Failed {
        error: AqiError,
    },
}

/// A forecast point extended with its AQI, or an error marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPoint {
    pub offset_hours: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub reading: RawReading,
    #[serde(flatten)]
    pub outcome: PointOutcome,
}

impl EnrichedPoint {
    pub fn aqi(&self) -> Option<u32> {
        match &self.outcome {
            PointOutcome::Rated { aqi, .. } => Some(*aqi),
            PointOutcome::Failed { .. } => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match &self.outcome {
            PointOutcome::Rated { category, .. } => Some(category.category),
            PointOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&AqiError> {
        match &self.outcome {
            PointOutcome::Failed { error } => Some(error),
            PointOutcome::Rated { .. } => None,
        }
    }
}

/// Current conditions plus the enriched forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub current: PointOutcome,
    pub forecasts: Vec<EnrichedPoint>,
    /// Offset of the highest-AQI forecast point (earliest on ties)
    pub peak_offset_hours: Option<u32>,
    pub peak_aqi: Option<u32>,
    pub failed_points: usize,
}

impl AqiCalculator {
    /// Rate a raw reading: parse, composite AQI, category.
    pub fn rate(&self, raw: &RawReading) -> Result<(CompositeAqi, Category), AqiError> {
        let reading = PollutantReading::try_from(raw)?;
        let composite = self.calculate_composite_aqi(&reading)?;
        let category = self.get_aqi_category(f64::from(composite.aqi))?;
        Ok((composite, category))
    }

    fn outcome(&self, raw: &RawReading) -> PointOutcome {
        match self.rate(raw) {
            Ok((composite, category)) => PointOutcome::Rated {
                aqi: composite.aqi,
                dominant_pollutant: composite.dominant_pollutant,
                category: category.info(),
            },
            Err(error) => PointOutcome::Failed { error },
        }
    }

    fn enrich_point(&self, point: &ForecastPoint) -> EnrichedPoint {
        let outcome = self.outcome(&point.reading);
        if let PointOutcome::Failed { error } = &outcome {
            tracing::debug!("Forecast point +{}h not rated: {}", point.offset_hours, error);
        }
        EnrichedPoint {
            offset_hours: point.offset_hours,
            timestamp: point.timestamp,
            reading: point.reading.clone(),
            outcome,
        }
    }

    /// Enrich every point sequentially.
    pub fn enrich(&self, points: &[ForecastPoint]) -> Vec<EnrichedPoint> {
        points.iter().map(|p| self.enrich_point(p)).collect()
    }

    /// Enrich every point in parallel. Output order matches input order.
    pub fn enrich_parallel(&self, points: &[ForecastPoint]) -> Vec<EnrichedPoint> {
        points.par_iter().map(|p| self.enrich_point(p)).collect()
    }

    /// Enrich, going parallel once the sequence reaches `parallel_min_points`.
    pub fn enrich_auto(&self, points: &[ForecastPoint], parallel_min_points: usize) -> Vec<EnrichedPoint> {
        if points.len() >= parallel_min_points {
            self.enrich_parallel(points)
        } else {
            self.enrich(points)
        }
    }

    /// Rate the current snapshot and the forecast together.
    pub fn build_forecast_report(
        &self,
        current: &RawReading,
        forecast: &[ForecastPoint],
        parallel_min_points: usize,
    ) -> ForecastReport {
        let current = self.outcome(current);
        let forecasts = self.enrich_auto(forecast, parallel_min_points);

        let failed_points = forecasts.iter().filter(|p| p.error().is_some()).count();
        if failed_points > 0 {
            tracing::warn!(
                "{} of {} forecast points could not be rated",
                failed_points,
                forecasts.len()
            );
        }

        // Strictly greater keeps the earliest point among equal peaks
        let peak = forecasts
            .iter()
            .filter_map(|p| p.aqi().map(|aqi| (p.offset_hours, aqi)))
            .fold(None, |best: Option<(u32, u32)>, (offset, aqi)| match best {
                Some((_, best_aqi)) if aqi <= best_aqi => best,
                _ => Some((offset, aqi)),
            });

        ForecastReport {
            current,
            peak_offset_hours: peak.map(|(offset, _)| offset),
            peak_aqi: peak.map(|(_, aqi)| aqi),
            failed_points,
            forecasts,
        }
    }
}
