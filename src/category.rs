//! AQI Categories
//!
//! CPCB category bands. Each band covers the half-open range
//! `[lower_bound, next lower_bound)`; `Severe` is open-ended. A value sitting
//! exactly on a band edge belongs to the higher band, the same convention the
//! breakpoint lookup uses for concentrations.

use crate::error::AqiError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl Category {
    /// All categories in ascending order of severity.
    pub const ALL: [Category; 6] = [
        Category::Good,
        Category::Satisfactory,
        Category::Moderate,
        Category::Poor,
        Category::VeryPoor,
        Category::Severe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Satisfactory => "Satisfactory",
            Category::Moderate => "Moderate",
            Category::Poor => "Poor",
            Category::VeryPoor => "Very Poor",
            Category::Severe => "Severe",
        }
    }

    /// Severity rank, 1 (Good) to 6 (Severe).
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    /// Inclusive lower edge of the band.
    pub fn lower_bound(&self) -> u32 {
        match self {
            Category::Good => 0,
            Category::Satisfactory => 50,
            Category::Moderate => 100,
            Category::Poor => 200,
            Category::VeryPoor => 300,
            Category::Severe => 400,
        }
    }

    /// Exclusive upper edge, `None` for the open-ended top band.
    pub fn upper_bound(&self) -> Option<u32> {
        match self {
            Category::Severe => None,
            _ => Some(Category::ALL[*self as usize + 1].lower_bound()),
        }
    }

    /// CPCB colour code
    pub fn color(&self) -> &'static str {
        match self {
            Category::Good => "#00B050",
            Category::Satisfactory => "#92D050",
            Category::Moderate => "#FFFF00",
            Category::Poor => "#FF9900",
            Category::VeryPoor => "#FF0000",
            Category::Severe => "#C00000",
        }
    }

    /// Generic health advisory for the band.
    pub fn health_message(&self) -> &'static str {
        match self {
            Category::Good => "Minimal impact",
            Category::Satisfactory => "Minor breathing discomfort to sensitive people",
            Category::Moderate => {
                "Breathing discomfort to people with lung disease such as asthma, and discomfort to people with heart disease, children and older adults"
            }
            Category::Poor => {
                "Breathing discomfort to most people on prolonged exposure, and discomfort to people with heart disease"
            }
            Category::VeryPoor => {
                "Respiratory illness on prolonged exposure; effect may be more pronounced in people with lung and heart diseases"
            }
            Category::Severe => {
                "Affects healthy people and seriously impacts those with existing diseases, even during light physical activity"
            }
        }
    }

    /// Band containing `aqi`.
    pub fn from_aqi(aqi: f64) -> Result<Self, AqiError> {
        if aqi.is_nan() || aqi < 0.0 {
            return Err(AqiError::InvalidAqi { value: aqi });
        }
        let category = Category::ALL
            .iter()
            .rev()
            .find(|c| aqi >= f64::from(c.lower_bound()))
            .copied()
            .unwrap_or(Category::Good);
        Ok(category)
    }

    pub fn info(&self) -> CategoryInfo {
        CategoryInfo {
            category: *self,
            name: self.name(),
            rank: self.rank(),
            color: self.color(),
            message: self.health_message(),
            min_aqi: self.lower_bound(),
            max_aqi: self.upper_bound(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flattened view of a category for response formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub name: &'static str,
    pub rank: u8,
    pub color: &'static str,
    pub message: &'static str,
    pub min_aqi: u32,
    /// Exclusive
    pub max_aqi: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_edges() {
        assert_eq!(Category::from_aqi(0.0), Ok(Category::Good));
        assert_eq!(Category::from_aqi(49.9), Ok(Category::Good));
        assert_eq!(Category::from_aqi(50.0), Ok(Category::Satisfactory));
        assert_eq!(Category::from_aqi(100.0), Ok(Category::Moderate));
        assert_eq!(Category::from_aqi(199.0), Ok(Category::Moderate));
        assert_eq!(Category::from_aqi(200.0), Ok(Category::Poor));
        assert_eq!(Category::from_aqi(300.0), Ok(Category::VeryPoor));
        assert_eq!(Category::from_aqi(400.0), Ok(Category::Severe));
        assert_eq!(Category::from_aqi(12_000.0), Ok(Category::Severe));
        assert_eq!(Category::from_aqi(f64::INFINITY), Ok(Category::Severe));
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(matches!(Category::from_aqi(-1.0), Err(AqiError::InvalidAqi { .. })));
        assert!(matches!(Category::from_aqi(f64::NAN), Err(AqiError::InvalidAqi { .. })));
    }

    #[test]
    fn test_bands_are_contiguous() {
        assert_eq!(Category::Good.lower_bound(), 0);
        for pair in Category::ALL.windows(2) {
            assert_eq!(pair[0].upper_bound(), Some(pair[1].lower_bound()));
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(Category::Severe.upper_bound(), None);
    }

    #[test]
    fn test_info_fields() {
        let info = Category::VeryPoor.info();
        assert_eq!(info.name, "Very Poor");
        assert_eq!(info.rank, 5);
        assert_eq!(info.min_aqi, 300);
        assert_eq!(info.max_aqi, Some(400));
        assert!(!info.message.is_empty());
    }
}
