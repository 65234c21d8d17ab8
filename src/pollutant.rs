//! Pollutant identifiers and readings.
//!
//! Readings arrive from providers and the forecasting model keyed by loose
//! string identifiers (`"pm25"`, `"PM2.5"`, ...). They are parsed into the
//! closed `Pollutant` enumeration here, so unknown keys are rejected at the
//! boundary instead of being silently dropped.

use crate::error::AqiError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Pollutants covered by the national AQI.
///
/// Declaration order is the health-severity priority used to break ties
/// between equal sub-indices: PM2.5 > PM10 > NO2 > O3 > SO2 > CO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "pm25", alias = "pm2.5", alias = "pm2_5", alias = "PM2.5")]
    Pm25,
    #[serde(rename = "pm10", alias = "PM10")]
    Pm10,
    #[serde(rename = "no2", alias = "NO2")]
    No2,
    #[serde(rename = "o3", alias = "O3")]
    O3,
    #[serde(rename = "so2", alias = "SO2")]
    So2,
    #[serde(rename = "co", alias = "CO")]
    Co,
}

impl Pollutant {
    /// All pollutants, highest priority first.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Canonical wire key
    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }

    /// Concentration unit the breakpoint table is expressed in.
    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "µg/m³",
        }
    }

    /// Tie-break priority, 0 = most severe.
    pub fn priority(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pm25" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "no2" => Ok(Pollutant::No2),
            "o3" => Ok(Pollutant::O3),
            "so2" => Ok(Pollutant::So2),
            "co" => Ok(Pollutant::Co),
            _ => Err(AqiError::unknown(s)),
        }
    }
}

/// Reading as emitted by providers and the forecasting model.
pub type RawReading = BTreeMap<String, Option<f64>>;

/// Pollutant concentrations for one place and time.
///
/// Not every pollutant needs to be present; a `None` value counts as absent.
/// Deserialization goes through [`PollutantReading::parse`], so two spellings
/// of one pollutant in the same object are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawReading")]
pub struct PollutantReading {
    values: BTreeMap<Pollutant, Option<f64>>,
}

impl PollutantReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, pollutant: Pollutant, concentration: f64) -> Self {
        self.values.insert(pollutant, Some(concentration));
        self
    }

    pub fn set(&mut self, pollutant: Pollutant, concentration: Option<f64>) {
        self.values.insert(pollutant, concentration);
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.values.get(&pollutant).copied().flatten()
    }

    /// Parse a string-keyed reading.
    ///
    /// Fails on the first unknown key, or on a key that names a pollutant
    /// already seen under another spelling (`"PM2.5"` and `"pm25"`).
    pub fn parse<I, K>(raw: I) -> Result<Self, AqiError>
    where
        I: IntoIterator<Item = (K, Option<f64>)>,
        K: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let pollutant: Pollutant = key.as_ref().parse()?;
            match values.entry(pollutant) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    return Err(AqiError::DuplicatePollutant {
                        pollutant,
                        identifier: key.as_ref().to_string(),
                    });
                }
            }
        }
        Ok(Self { values })
    }

    /// Present (non-null) values in priority order.
    pub fn present(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.values
            .iter()
            .filter_map(|(pollutant, value)| value.map(|v| (*pollutant, v)))
    }

    /// True when no pollutant carries a value.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Convert back to the string-keyed form.
    pub fn to_raw(&self) -> RawReading {
        self.values
            .iter()
            .map(|(pollutant, value)| (pollutant.key().to_string(), *value))
            .collect()
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<T: IntoIterator<Item = (Pollutant, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(p, v)| (p, Some(v))).collect(),
        }
    }
}

impl TryFrom<&RawReading> for PollutantReading {
    type Error = AqiError;

    fn try_from(raw: &RawReading) -> Result<Self, Self::Error> {
        Self::parse(raw.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

impl TryFrom<RawReading> for PollutantReading {
    type Error = AqiError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl Serialize for PollutantReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
