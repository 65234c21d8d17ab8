//! AQI Engine
//!
//! Air Quality Index computation and forecast enrichment for the Indian CPCB
//! National AQI.
//!
//! - `breakpoints/`: piecewise-linear breakpoint tables (built-in CPCB, or JSON)
//! - `calculator`: sub-index, composite AQI and dominant pollutant
//! - `category`: AQI bands with rank, colour and health message
//! - `forecast`: per-point enrichment of predicted pollutant trajectories
//! - `breakdown`: per-pollutant report for one reading
//! - `advisory`: threshold alerts and user-group recommendations
//! - `config`: environment-driven engine setup
//!
//! Every calculation is a pure function over tables built once at startup.

pub mod advisory;
pub mod breakdown;
pub mod breakpoints;
pub mod calculator;
pub mod category;
pub mod config;
pub mod error;
pub mod forecast;
pub mod pollutant;

// Re-export commonly used types
pub use breakdown::{health_impact, PollutantBreakdown};
pub use breakpoints::{Breakpoint, BreakpointTable};
pub use calculator::{select_dominant, AqiCalculator, CompositeAqi, SubIndex};
pub use category::{Category, CategoryInfo};
pub use config::EngineConfig;
pub use error::{AqiError, BreakpointTableError};
pub use forecast::{EnrichedPoint, ForecastPoint, ForecastReport, PointOutcome};
pub use pollutant::{Pollutant, PollutantReading, RawReading};
